//! Generated-rules repository trait

use async_trait::async_trait;

use super::entity::{GeneratedRules, NewGeneratedRules};
use crate::domain::DomainError;

/// Repository trait for persisting AI-generated transformation rules
#[async_trait]
pub trait RulesRepository: Send + Sync + std::fmt::Debug {
    /// Persist a generated rule set
    async fn save(&self, rules: NewGeneratedRules) -> Result<GeneratedRules, DomainError>;

    /// Most recent rule sets for a workflow, newest first
    async fn list_for_workflow(
        &self,
        workflow_id: i64,
        limit: i64,
    ) -> Result<Vec<GeneratedRules>, DomainError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    pub struct MockRulesRepository {
        rules: Mutex<Vec<GeneratedRules>>,
        should_fail: Mutex<Option<String>>,
    }

    impl MockRulesRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_error(self, error: impl Into<String>) -> Self {
            *self.should_fail.lock().unwrap() = Some(error.into());
            self
        }

        pub fn entries(&self) -> Vec<GeneratedRules> {
            self.rules.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RulesRepository for MockRulesRepository {
        async fn save(&self, rules: NewGeneratedRules) -> Result<GeneratedRules, DomainError> {
            if let Some(ref msg) = *self.should_fail.lock().unwrap() {
                return Err(DomainError::storage(msg.clone()));
            }
            let mut stored = self.rules.lock().unwrap();
            let record = GeneratedRules {
                id: stored.len() as i64 + 1,
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
            if let Some(ref msg) = *self.should_fail.lock().unwrap() {
                return Err(DomainError::storage(msg.clone()));
            }
            let mut matching: Vec<GeneratedRules> = self
                .rules
                .lock()
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
}
