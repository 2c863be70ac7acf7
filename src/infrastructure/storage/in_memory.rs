//! In-memory repository implementations
//!
//! Used for tests and for starting the service without a database, mirroring
//! the degraded DB-less startup mode. Data does not survive a restart.

use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::log::{LogRecord, LogRepository, NewLogRecord};
use crate::domain::rules::{GeneratedRules, NewGeneratedRules, RulesRepository};
use crate::domain::workflow::{NewWorkflow, Workflow, WorkflowRepository};
use crate::domain::DomainError;

/// In-memory workflow repository
#[derive(Debug, Default)]
pub struct InMemoryWorkflowRepository {
    workflows: RwLock<Vec<Workflow>>,
}

impl InMemoryWorkflowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn get(&self, id: i64) -> Result<Option<Workflow>, DomainError> {
        Ok(self
            .workflows
            .read()
            .unwrap()
            .iter()
            .find(|w| w.id == id)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Workflow>, DomainError> {
        let mut workflows = self.workflows.read().unwrap().clone();
        workflows.sort_by_key(|w| w.id);
        Ok(workflows
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn create(&self, workflow: NewWorkflow) -> Result<Workflow, DomainError> {
        let mut workflows = self.workflows.write().unwrap();
        let id = workflows.iter().map(|w| w.id).max().unwrap_or(0) + 1;
        let created = Workflow {
            id,
            name: workflow.name,
            description: workflow.description,
            created_at: Utc::now(),
        };
        workflows.push(created.clone());
        Ok(created)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let mut workflows = self.workflows.write().unwrap();
        let before = workflows.len();
        workflows.retain(|w| w.id != id);
        Ok(workflows.len() < before)
    }
}

/// In-memory log repository
#[derive(Debug, Default)]
pub struct InMemoryLogRepository {
    records: RwLock<Vec<LogRecord>>,
}

impl InMemoryLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn sorted_desc(records: Vec<LogRecord>) -> Vec<LogRecord> {
        let mut records = records;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        records
    }
}

#[async_trait]
impl LogRepository for InMemoryLogRepository {
    async fn append(&self, entry: NewLogRecord) -> Result<LogRecord, DomainError> {
        let mut records = self.records.write().unwrap();
        let id = records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = LogRecord {
            id,
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
        let matching: Vec<LogRecord> = self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.workflow_id == workflow_id)
            .cloned()
            .collect();
        Ok(Self::sorted_desc(matching)
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
        Ok(Self::sorted_desc(self.records.read().unwrap().clone()))
    }

    async fn delete_older_than(&self, age_days: i64) -> Result<u64, DomainError> {
        let cutoff = Utc::now() - Duration::days(age_days);
        let mut records = self.records.write().unwrap();
        let before = records.len();
        records.retain(|r| r.timestamp >= cutoff);
        Ok((before - records.len()) as u64)
    }
}

/// In-memory generated-rules repository
#[derive(Debug, Default)]
pub struct InMemoryRulesRepository {
    rules: RwLock<Vec<GeneratedRules>>,
}

impl InMemoryRulesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RulesRepository for InMemoryRulesRepository {
    async fn save(&self, rules: NewGeneratedRules) -> Result<GeneratedRules, DomainError> {
        let mut stored = self.rules.write().unwrap();
        let id = stored.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        let record = GeneratedRules {
            id,
            workflow_id: rules.workflow_id,
            user_query: rules.user_query,
            rules_text: rules.rules_text,
            created_at: Utc::now(),
        };
        stored.push(record.clone());
        Ok(record)
    }

    async fn list_for_workflow(
        &self,
        workflow_id: i64,
        limit: i64,
    ) -> Result<Vec<GeneratedRules>, DomainError> {
        let mut matching: Vec<GeneratedRules> = self
            .rules
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.workflow_id == workflow_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        matching.truncate(limit.max(0) as usize);
        Ok(matching)
    }
}
