//! Workflow domain entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Maximum length for workflow names
pub const MAX_NAME_LENGTH: usize = 255;

/// An ETL workflow whose logs this service stores and analyzes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a workflow; id and created_at are assigned by the
/// repository
#[derive(Debug, Clone)]
pub struct NewWorkflow {
    pub name: String,
    pub description: Option<String>,
}

impl NewWorkflow {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        validate_workflow_name(&name)?;
        Ok(Self {
            name,
            description: None,
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Validate a workflow name
pub fn validate_workflow_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("Workflow name cannot be empty"));
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "Workflow name exceeds maximum length of {} characters",
            MAX_NAME_LENGTH
        )));
    }

    Ok(())
}
