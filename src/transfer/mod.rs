//! Transfer pipeline - validated tasks to published relay events
//!
//! Tasks run strictly sequentially and every task yields exactly one
//! receipt, in input order. Only the initial connect can abort the batch;
//! per-task failures (unsupported token, relay rejection) land in the
//! task's receipt and the batch continues.

pub mod receipt;

use std::sync::Arc;

use nostr::{Kind, Tag, Timestamp, UnsignedEvent};

use crate::identity::Identity;
use crate::relay::{RelayError, RelaySession};
use crate::task::{Task, TokenKind};

pub use receipt::Receipt;

/// Routing tag attached to every transfer event
pub const TRANSFER_TOPIC: &str = "token-transfer";

/// Batch transfer pipeline over an owned relay session
pub struct TransferPipeline<S> {
    identity: Arc<Identity>,
    recipient: nostr::PublicKey,
    session: S,
}

impl<S: RelaySession> TransferPipeline<S> {
    pub fn new(identity: Arc<Identity>, recipient: nostr::PublicKey, session: S) -> Self {
        Self { identity, recipient, session }
    }

    /// Run the batch. One receipt per task, in task order.
    ///
    /// Connects first if the session is down; a failed connect aborts
    /// before any task is processed.
    pub async fn run(&mut self, tasks: &[Task]) -> Result<Vec<Receipt>, RelayError> {
        if !self.session.is_connected().await {
            tracing::info!("relay not connected, connecting before batch");
            self.session.connect().await?;
        }

        let mut receipts = Vec::with_capacity(tasks.len());
        for task in tasks {
            receipts.push(self.process(task).await);
        }

        let failed = receipts.iter().filter(|r| r.error.is_some()).count();
        tracing::info!(
            total = receipts.len(),
            published = receipts.len() - failed,
            failed,
            "batch complete"
        );
        Ok(receipts)
    }

    async fn process(&mut self, task: &Task) -> Receipt {
        if TokenKind::parse(&task.token).is_none() {
            tracing::warn!(token = %task.token, "unsupported token, skipping publish");
            return Receipt::failed(task, "unsupported token");
        }

        let event = match self.build_event(task) {
            Ok(event) => event,
            Err(e) => return Receipt::failed(task, e.to_string()),
        };

        let event_id = event.id.to_string();
        match self.session.publish(&event).await {
            Ok(()) => {
                tracing::debug!(%event_id, token = %task.token, "transfer published");
                Receipt::published(task, event_id)
            }
            Err(e) => {
                tracing::warn!(token = %task.token, error = %e, "transfer publish failed");
                Receipt::failed(task, e.to_string())
            }
        }
    }

    /// NIP-04 encrypted kind-4 event carrying the transfer instruction
    fn build_event(&self, task: &Task) -> anyhow::Result<nostr::Event> {
        let plaintext = format!("transfer {} {} to {}", task.amount, task.token, task.address);
        let ciphertext = nostr::nips::nip04::encrypt(
            self.identity.keys.secret_key(),
            &self.recipient,
            plaintext,
        )?;

        let tags = vec![Tag::public_key(self.recipient), Tag::hashtag(TRANSFER_TOPIC)];
        let unsigned = UnsignedEvent::new(
            self.identity.keys.public_key(),
            Timestamp::now(),
            Kind::EncryptedDirectMessage,
            tags,
            ciphertext,
        );
        Ok(unsigned.sign_with_keys(&self.identity.keys)?)
    }
}
