//! Relay - single-connection NIP-01 publish transport
//!
//! `RelayClient` is the real tokio-tungstenite implementation; the
//! `RelaySession` trait is the seam the transfer pipeline drives, so tests
//! can substitute their own session.

pub mod client;

use async_trait::async_trait;
use nostr::Event;

pub use client::{parse_relay_message, RelayClient, RelayMessage, RelayState};

/// Errors from the relay transport
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("connect to {url} failed: {reason}")]
    Connect { url: String, reason: String },
    #[error("not connected")]
    NotConnected,
    #[error("connection closed")]
    Closed,
    #[error("relay rejected event: {0}")]
    Rejected(String),
}

/// One session, one relay. Publish waits for the relay's acknowledgement.
#[async_trait]
pub trait RelaySession: Send {
    async fn is_connected(&self) -> bool;
    async fn connect(&mut self) -> Result<(), RelayError>;
    async fn publish(&mut self, event: &Event) -> Result<(), RelayError>;
}
