//! Workflow repository trait

use async_trait::async_trait;

use super::entity::{NewWorkflow, Workflow};
use crate::domain::DomainError;

/// Repository trait for workflow persistence
#[async_trait]
pub trait WorkflowRepository: Send + Sync + std::fmt::Debug {
    /// Get a workflow by ID
    async fn get(&self, id: i64) -> Result<Option<Workflow>, DomainError>;

    /// Page through workflows in id order
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Workflow>, DomainError>;

    /// Create a new workflow, assigning id and created_at
    async fn create(&self, workflow: NewWorkflow) -> Result<Workflow, DomainError>;

    /// Delete a workflow by ID
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;

    /// Check if a workflow exists
    async fn exists(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.get(id).await?.is_some())
    }
}
