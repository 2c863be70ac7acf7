//! Log repository trait

use async_trait::async_trait;

use super::entity::{LogRecord, NewLogRecord};
use crate::domain::DomainError;

/// Repository trait for workflow log persistence. Listing queries return
/// records newest first.
#[async_trait]
pub trait LogRepository: Send + Sync + std::fmt::Debug {
    /// Append a log record, assigning id and timestamp
    async fn append(&self, entry: NewLogRecord) -> Result<LogRecord, DomainError>;

    /// Page through one workflow's logs, newest first
    async fn list_for_workflow(
        &self,
        workflow_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LogRecord>, DomainError>;

    /// Most recent logs for one workflow
    async fn list_recent(&self, workflow_id: i64, limit: i64)
        -> Result<Vec<LogRecord>, DomainError>;

    /// All logs across workflows, newest first
    async fn list_all(&self) -> Result<Vec<LogRecord>, DomainError>;

    /// Bulk-delete records older than the given age, returning the count
    async fn delete_older_than(&self, age_days: i64) -> Result<u64, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::{Duration, Utc};
    use std::sync::Mutex;

    /// Mock log repository for testing
    #[derive(Debug, Default)]
    pub struct MockLogRepository {
        records: Mutex<Vec<LogRecord>>,
        should_fail: Mutex<Option<String>>,
    }

    impl MockLogRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_record(self, record: LogRecord) -> Self {
            self.records.lock().unwrap().push(record);
            self
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.should_fail.lock().unwrap() = Some(error.into());
            self
        }

        /// Everything appended so far, in insertion order
        pub fn entries(&self) -> Vec<LogRecord> {
            self.records.lock().unwrap().clone()
        }

        fn check_error(&self) -> Result<(), DomainError> {
            if let Some(ref msg) = *self.should_fail.lock().unwrap() {
                return Err(DomainError::storage(msg.clone()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl LogRepository for MockLogRepository {
        async fn append(&self, entry: NewLogRecord) -> Result<LogRecord, DomainError> {
            self.check_error()?;
            let mut records = self.records.lock().unwrap();
            let record = LogRecord {
                id: records.len() as i64 + 1,
                workflow_id: entry.workflow_id,
                log_type: entry.log_type,
                message: entry.message,
                timestamp: Utc::now(),
            };
            records.push(record.clone());
            Ok(record)
        }

        async fn list_for_workflow(
            &self,
            workflow_id: i64,
            offset: i64,
            limit: i64,
        ) -> Result<Vec<LogRecord>, DomainError> {
            self.check_error()?;
            let records = self.records.lock().unwrap();
            let mut matching: Vec<LogRecord> = records
                .iter()
                .filter(|r| r.workflow_id == workflow_id)
                .cloned()
                .collect();
            matching.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            Ok(matching
                .into_iter()
                .skip(offset.max(0) as usize)
                .take(limit.max(0) as usize)
                .collect())
        }

        async fn list_recent(
            &self,
            workflow_id: i64,
            limit: i64,
        ) -> Result<Vec<LogRecord>, DomainError> {
            self.list_for_workflow(workflow_id, 0, limit).await
        }

        async fn list_all(&self) -> Result<Vec<LogRecord>, DomainError> {
            self.check_error()?;
            let mut records = self.records.lock().unwrap().clone();
            records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
            Ok(records)
        }

        async fn delete_older_than(&self, age_days: i64) -> Result<u64, DomainError> {
            self.check_error()?;
            let cutoff = Utc::now() - Duration::days(age_days);
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| r.timestamp >= cutoff);
            Ok((before - records.len()) as u64)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_append_and_list() {
            let repo = MockLogRepository::new();
            repo.append(NewLogRecord::new(1, "Error", "first"))
                .await
                .unwrap();
            repo.append(NewLogRecord::new(1, "Warning", "second"))
                .await
                .unwrap();
            repo.append(NewLogRecord::new(2, "Info", "other workflow"))
                .await
                .unwrap();

            let logs = repo.list_for_workflow(1, 0, 50).await.unwrap();
            assert_eq!(logs.len(), 2);
            // Newest first
            assert_eq!(logs[0].message, "second");

            let all = repo.list_all().await.unwrap();
            assert_eq!(all.len(), 3);
        }

        #[tokio::test]
        async fn test_mock_pagination() {
            let repo = MockLogRepository::new();
            for i in 0..5 {
                repo.append(NewLogRecord::new(1, "Info", format!("msg {}", i)))
                    .await
                    .unwrap();
            }

            let page = repo.list_for_workflow(1, 2, 2).await.unwrap();
            assert_eq!(page.len(), 2);
            assert_eq!(page[0].message, "msg 2");
        }

        #[tokio::test]
        async fn test_mock_prune_by_age() {
            let old = LogRecord {
                id: 1,
                workflow_id: 1,
                log_type: "Error".to_string(),
                message: "ancient".to_string(),
                timestamp: Utc::now() - Duration::days(60),
            };
            let repo = MockLogRepository::new().with_record(old);
            repo.append(NewLogRecord::new(1, "Info", "fresh"))
                .await
                .unwrap();

            let deleted = repo.delete_older_than(30).await.unwrap();
            assert_eq!(deleted, 1);
            assert_eq!(repo.list_all().await.unwrap().len(), 1);
        }
    }
}
