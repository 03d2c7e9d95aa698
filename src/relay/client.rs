//! Nostr relay client - tokio-tungstenite WebSocket
//!
//! Maintains one connection to one relay. Outbound frames go through an
//! mpsc channel into a writer task; a reader task drains the socket and
//! forwards parsed acknowledgement frames to the publish path.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::{RelayError, RelaySession};

/// Relay connection state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Disconnected,
    Connecting,
    Connected,
}

/// Nostr relay client
pub struct RelayClient {
    url: String,
    state: Arc<RwLock<RelayState>>,
    tx: Option<mpsc::Sender<String>>,
    acks: Option<mpsc::Receiver<RelayMessage>>,
}

impl RelayClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            state: Arc::new(RwLock::new(RelayState::Disconnected)),
            tx: None,
            acks: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn state(&self) -> RelayState {
        *self.state.read().await
    }

    /// Connect to the relay and spawn the reader/writer tasks
    pub async fn connect(&mut self) -> Result<(), RelayError> {
        *self.state.write().await = RelayState::Connecting;

        let (ws, _) = match connect_async(&self.url).await {
            Ok(ws) => ws,
            Err(e) => {
                *self.state.write().await = RelayState::Disconnected;
                return Err(RelayError::Connect {
                    url: self.url.clone(),
                    reason: e.to_string(),
                });
            }
        };
        let (mut write, mut read) = ws.split();

        // Channel for outgoing frames
        let (out_tx, mut out_rx) = mpsc::channel::<String>(32);
        self.tx = Some(out_tx);

        // Channel for relay acknowledgements
        let (ack_tx, ack_rx) = mpsc::channel::<RelayMessage>(64);
        self.acks = Some(ack_rx);

        let state = self.state.clone();
        *state.write().await = RelayState::Connected;

        // Spawn writer task
        let state_w = state.clone();
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                if write.send(Message::Text(msg)).await.is_err() {
                    break;
                }
            }
            *state_w.write().await = RelayState::Disconnected;
        });

        // Spawn reader task
        let state_r = state;
        tokio::spawn(async move {
            while let Some(Ok(msg)) = read.next().await {
                if let Message::Text(txt) = msg {
                    if let Some(parsed) = parse_relay_message(&txt) {
                        if ack_tx.send(parsed).await.is_err() {
                            break;
                        }
                    }
                }
            }
            *state_r.write().await = RelayState::Disconnected;
        });

        tracing::info!(url = %self.url, "relay connected");
        Ok(())
    }

    async fn send(&self, msg: &str) -> Result<(), RelayError> {
        let tx = self.tx.as_ref().ok_or(RelayError::NotConnected)?;
        tx.send(msg.to_string()).await.map_err(|_| RelayError::Closed)
    }

    /// Publish an event (NIP-01) and wait for the relay's `OK` verdict
    pub async fn publish(&mut self, event: &nostr::Event) -> Result<(), RelayError> {
        let frame = json!(["EVENT", event]).to_string();
        self.send(&frame).await?;

        let event_id = event.id.to_string();
        let acks = self.acks.as_mut().ok_or(RelayError::NotConnected)?;
        loop {
            match acks.recv().await {
                None => return Err(RelayError::Closed),
                Some(RelayMessage::Ok { event_id: id, accepted, message }) if id == event_id => {
                    if accepted {
                        return Ok(());
                    }
                    return Err(RelayError::Rejected(message.unwrap_or_default()));
                }
                Some(RelayMessage::Notice { message }) => {
                    tracing::debug!(%message, "relay notice");
                }
                Some(_) => {}
            }
        }
    }
}

#[async_trait]
impl RelaySession for RelayClient {
    async fn is_connected(&self) -> bool {
        self.state().await == RelayState::Connected
    }

    async fn connect(&mut self) -> Result<(), RelayError> {
        RelayClient::connect(self).await
    }

    async fn publish(&mut self, event: &nostr::Event) -> Result<(), RelayError> {
        RelayClient::publish(self, event).await
    }
}

/// Parse a relay frame (NIP-01)
pub fn parse_relay_message(msg: &str) -> Option<RelayMessage> {
    let arr: Vec<Value> = serde_json::from_str(msg).ok()?;
    let cmd = arr.first()?.as_str()?;
    match cmd {
        "OK" => {
            let event_id = arr.get(1)?.as_str()?.to_string();
            let accepted = arr.get(2)?.as_bool()?;
            let message = arr.get(3).and_then(|v| v.as_str()).map(String::from);
            Some(RelayMessage::Ok { event_id, accepted, message })
        }
        "NOTICE" => {
            let message = arr.get(1)?.as_str()?.to_string();
            Some(RelayMessage::Notice { message })
        }
        _ => None,
    }
}

/// Relay frame types the client consumes
#[derive(Debug)]
pub enum RelayMessage {
    Ok { event_id: String, accepted: bool, message: Option<String> },
    Notice { message: String },
}
