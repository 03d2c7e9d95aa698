//! Treatwire: batch token transfers over a Nostr relay.
//!
//! # Architecture
//!
//! ```text
//! task text ──▶ parse_tasks ──▶ Vec<Task>
//!                                   │
//! mnemonic ──▶ Identity ──▶ TransferPipeline ──▶ Vec<Receipt> ──▶ receipts.json
//!                                   │
//!                             RelaySession
//!                       (RelayClient over WebSocket)
//! ```
//!
//! The pipeline connects the session if needed, then walks the tasks
//! strictly sequentially: unsupported tokens are rejected without touching
//! the relay, supported ones become NIP-04 encrypted kind-4 events
//! addressed to the configured treasury and published one at a time. Every
//! task ends as exactly one receipt, in input order.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use treatwire::{parse_tasks, Identity, RelayClient, SessionConfig, TransferPipeline};
//!
//! let identity = Identity::from_mnemonic("abandon abandon ... about")?;
//! let tasks = parse_tasks("npub1xyz-TREAT-100\nnpub1abc-SATS-50")?;
//!
//! let config = SessionConfig::default();
//! let session = RelayClient::new(config.relay_url.clone());
//! let mut pipeline = TransferPipeline::new(Arc::new(identity), config.recipient_key()?, session);
//!
//! let receipts = pipeline.run(&tasks).await?;
//! treatwire::transfer::receipt::write_receipts(std::path::Path::new("."), &receipts)?;
//! ```

pub mod config;
pub mod identity;
pub mod logging;
pub mod relay;
pub mod task;
pub mod transfer;

// =============================================================================
// Re-exports
// =============================================================================
pub use config::{SessionConfig, DEFAULT_RECIPIENT, DEFAULT_RELAY_URL};
pub use identity::{Identity, IdentityError};
pub use relay::{parse_relay_message, RelayClient, RelayError, RelayMessage, RelaySession, RelayState};
pub use task::{parse_tasks, ParseError, Task, TokenKind};
pub use transfer::receipt::{ExportError, Receipt, EXPORT_FILE_NAME};
pub use transfer::{TransferPipeline, TRANSFER_TOPIC};
