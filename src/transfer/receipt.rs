//! Receipts - per-task outcome records and the export artifact

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::task::Task;

/// File name of the export artifact
pub const EXPORT_FILE_NAME: &str = "receipts.json";

/// Outcome of one transfer task. Exactly one of `event_id`/`error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub address: String,
    pub amount: i64,
    pub token: String,
    #[serde(rename = "eventId", skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Receipt {
    pub fn published(task: &Task, event_id: impl Into<String>) -> Self {
        Self {
            address: task.address.clone(),
            amount: task.amount,
            token: task.token.clone(),
            event_id: Some(event_id.into()),
            error: None,
        }
    }

    pub fn failed(task: &Task, error: impl Into<String>) -> Self {
        Self {
            address: task.address.clone(),
            amount: task.amount,
            token: task.token.clone(),
            event_id: None,
            error: Some(error.into()),
        }
    }
}

/// Errors while exporting receipts
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("serialize receipts: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("write receipts: {0}")]
    Io(#[from] std::io::Error),
}

/// Serialize the receipt sequence as a pretty-printed JSON array
pub fn to_json(receipts: &[Receipt]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(receipts)?)
}

/// Write `receipts.json` into `dir` and return its path
pub fn write_receipts(dir: &Path, receipts: &[Receipt]) -> Result<PathBuf, ExportError> {
    let path = dir.join(EXPORT_FILE_NAME);
    std::fs::write(&path, to_json(receipts)?)?;
    Ok(path)
}
