//! Session configuration - relay endpoint and transfer recipient

use serde::{Deserialize, Serialize};

/// Default relay endpoint
pub const DEFAULT_RELAY_URL: &str = "wss://relay.damus.io";

/// Default treasury identity that receives transfer instructions
pub const DEFAULT_RECIPIENT: &str =
    "npub1zutzeysacnf9rru6zqwmxd54mud0k44tst6l70ja5mhv8jjumytsd2x7nu";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    pub relay_url: String,
    /// Recipient key, npub or hex
    pub recipient: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.into(),
            recipient: DEFAULT_RECIPIENT.into(),
        }
    }
}

impl SessionConfig {
    pub fn with_relay(mut self, url: impl Into<String>) -> Self {
        self.relay_url = url.into();
        self
    }

    pub fn with_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.recipient = recipient.into();
        self
    }

    /// Parse the configured recipient into a key
    pub fn recipient_key(&self) -> anyhow::Result<nostr::PublicKey> {
        nostr::PublicKey::parse(&self.recipient)
            .map_err(|e| anyhow::anyhow!("invalid recipient key '{}': {}", self.recipient, e))
    }
}
