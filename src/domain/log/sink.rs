//! Best-effort error sink backed by the log repository
//!
//! Sink writes are fire-and-forget relative to the orchestration path: a
//! storage failure is logged locally and never surfaces to the caller.

use std::sync::Arc;

use tracing::{error, info};

use super::entity::{LogRecord, NewLogRecord};
use super::repository::LogRepository;

#[derive(Debug)]
pub struct ErrorSink {
    logs: Arc<dyn LogRepository>,
}

impl ErrorSink {
    pub fn new(logs: Arc<dyn LogRepository>) -> Self {
        Self { logs }
    }

    /// Record an error for a workflow. Never fails.
    pub async fn record_error(&self, workflow_id: i64, error_type: &str, message: &str) {
        match self
            .logs
            .append(NewLogRecord::new(workflow_id, error_type, message))
            .await
        {
            Ok(_) => {
                info!(workflow_id, error_type, "Logged error for workflow");
            }
            Err(e) => {
                error!(workflow_id, error = %e, "Failed to log error to storage");
            }
        }
    }

    /// Most recent errors for a workflow, newest first; empty on storage
    /// failure
    pub async fn list_recent(&self, workflow_id: i64, limit: i64) -> Vec<LogRecord> {
        match self.logs.list_recent(workflow_id, limit).await {
            Ok(records) => records,
            Err(e) => {
                error!(workflow_id, error = %e, "Failed to fetch errors from storage");
                Vec::new()
            }
        }
    }

    /// Delete records older than the given age, returning the count removed;
    /// zero on storage failure
    pub async fn prune_older_than(&self, age_days: i64) -> u64 {
        match self.logs.delete_older_than(age_days).await {
            Ok(deleted) => {
                info!(deleted, age_days, "Cleared old error logs");
                deleted
            }
            Err(e) => {
                error!(error = %e, "Failed to clear old logs");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::log::repository::mock::MockLogRepository;

    #[tokio::test]
    async fn test_record_error_appends_a_log() {
        let repo = Arc::new(MockLogRepository::new());
        let sink = ErrorSink::new(repo.clone());

        sink.record_error(3, "API_Error", "provider unreachable").await;

        let entries = repo.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].workflow_id, 3);
        assert_eq!(entries[0].log_type, "API_Error");
        assert_eq!(entries[0].message, "provider unreachable");
    }

    #[tokio::test]
    async fn test_record_error_swallows_storage_failure() {
        let repo = Arc::new(MockLogRepository::new().with_error("disk full"));
        let sink = ErrorSink::new(repo);

        // Must not panic or propagate
        sink.record_error(3, "API_Error", "provider unreachable").await;
    }

    #[tokio::test]
    async fn test_list_recent_is_empty_on_failure() {
        let repo = Arc::new(MockLogRepository::new().with_error("disk full"));
        let sink = ErrorSink::new(repo);

        assert!(sink.list_recent(3, 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_prune_returns_zero_on_failure() {
        let repo = Arc::new(MockLogRepository::new().with_error("disk full"));
        let sink = ErrorSink::new(repo);

        assert_eq!(sink.prune_older_than(30).await, 0);
    }
}
