//! Generated transformation-rule records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A persisted set of AI-generated transformation rules for a workflow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedRules {
    pub id: i64,
    pub workflow_id: i64,
    pub user_query: String,
    pub rules_text: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for saving generated rules; id and created_at are assigned by
/// the repository
#[derive(Debug, Clone)]
pub struct NewGeneratedRules {
    pub workflow_id: i64,
    pub user_query: String,
    pub rules_text: String,
}

impl NewGeneratedRules {
    pub fn new(
        workflow_id: i64,
        user_query: impl Into<String>,
        rules_text: impl Into<String>,
    ) -> Self {
        Self {
            workflow_id,
            user_query: user_query.into(),
            rules_text: rules_text.into(),
        }
    }
}
