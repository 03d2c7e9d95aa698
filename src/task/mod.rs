//! Task parsing - one transfer per line: `address-token-amount`
//!
//! The token field is upper-cased on parse; whether it names a supported
//! token is checked by the pipeline, not here, so a rejected token still
//! produces a receipt instead of killing the batch.

use serde::{Deserialize, Serialize};

/// Tokens the treasury accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Sats,
    Treat,
    Trick,
    Nostr,
    Tna,
}

impl TokenKind {
    /// Case-insensitive lookup; `None` for anything outside the supported set.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_uppercase().as_str() {
            "SATS" => Some(Self::Sats),
            "TREAT" => Some(Self::Treat),
            "TRICK" => Some(Self::Trick),
            "NOSTR" => Some(Self::Nostr),
            "TNA" => Some(Self::Tna),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sats => "SATS",
            Self::Treat => "TREAT",
            Self::Trick => "TRICK",
            Self::Nostr => "NOSTR",
            Self::Tna => "TNA",
        }
    }
}

/// One transfer order, parsed from a single line of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub address: String,
    /// Upper-cased token field, supported or not
    pub token: String,
    pub amount: i64,
}

/// Errors while parsing task text
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: expected address-token-amount, found {fields} fields")]
    FieldCount { line: usize, fields: usize },
    #[error("line {line}: invalid amount '{value}'")]
    InvalidAmount { line: usize, value: String },
}

/// Parse raw task text, one transfer per line, blank lines skipped.
///
/// Any malformed line fails the whole input: zero tasks come back, never a
/// partial batch.
pub fn parse_tasks(input: &str) -> Result<Vec<Task>, ParseError> {
    let mut tasks = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('-').collect();
        if fields.len() != 3 {
            return Err(ParseError::FieldCount { line: idx + 1, fields: fields.len() });
        }

        let amount_text = fields[2].trim();
        let amount: i64 = amount_text.parse().map_err(|_| ParseError::InvalidAmount {
            line: idx + 1,
            value: amount_text.to_string(),
        })?;

        tasks.push(Task {
            address: fields[0].trim().to_string(),
            token: fields[1].trim().to_ascii_uppercase(),
            amount,
        });
    }

    Ok(tasks)
}
