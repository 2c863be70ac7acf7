//! Workflow log records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Log type written by the error sink for provider failures
pub const API_ERROR_LOG_TYPE: &str = "API_Error";

/// A persisted log line attached to a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: i64,
    pub workflow_id: i64,
    pub log_type: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Payload for appending a log record; id and timestamp are assigned by the
/// repository
#[derive(Debug, Clone)]
pub struct NewLogRecord {
    pub workflow_id: i64,
    pub log_type: String,
    pub message: String,
}

impl NewLogRecord {
    pub fn new(
        workflow_id: i64,
        log_type: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            workflow_id,
            log_type: log_type.into(),
            message: message.into(),
        }
    }
}
