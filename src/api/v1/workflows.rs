//! Workflow CRUD endpoints

use axum::extract::{Path, Query, State};
use serde::Deserialize;
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::workflow::{NewWorkflow, Workflow, WorkflowRepository};

/// Offset/limit pagination, matching the skip/limit query parameters
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct Pagination {
    pub skip: i64,
    pub limit: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self { skip: 0, limit: 50 }
    }
}

/// Request to create a workflow
#[derive(Debug, Deserialize, Validate)]
pub struct CreateWorkflowRequest {
    #[validate(length(min = 1, max = 255, message = "name must be 1-255 characters"))]
    pub name: String,
    pub description: Option<String>,
}

/// GET /v1/workflows
pub async fn list_workflows(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<Workflow>>, ApiError> {
    debug!(skip = pagination.skip, limit = pagination.limit, "Listing workflows");

    let workflows = state
        .workflows
        .list(pagination.skip, pagination.limit)
        .await
        .map_err(ApiError::from)?;

    Ok(Json(workflows))
}

/// POST /v1/workflows
pub async fn create_workflow(
    State(state): State<AppState>,
    Json(request): Json<CreateWorkflowRequest>,
) -> Result<Json<Workflow>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let mut new_workflow = NewWorkflow::new(request.name).map_err(ApiError::from)?;
    if let Some(description) = request.description {
        new_workflow = new_workflow.with_description(description);
    }

    let workflow = state
        .workflows
        .create(new_workflow)
        .await
        .map_err(ApiError::from)?;

    debug!(workflow_id = workflow.id, "Created workflow");
    Ok(Json(workflow))
}

/// GET /v1/workflows/:workflow_id
pub async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<i64>,
) -> Result<Json<Workflow>, ApiError> {
    let workflow = state
        .workflows
        .get(workflow_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Workflow not found").with_param("workflow_id"))?;

    Ok(Json(workflow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::state::test_support::state_with_provider;
    use crate::domain::llm::MockLlmProvider;

    fn state() -> AppState {
        state_with_provider(MockLlmProvider::new())
    }

    #[tokio::test]
    async fn test_create_then_list_workflows() {
        let state = state();

        let created = create_workflow(
            State(state.clone()),
            Json(CreateWorkflowRequest {
                name: "Customer Data Migration".to_string(),
                description: Some("legacy migration".to_string()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(created.0.name, "Customer Data Migration");

        let listed = list_workflows(State(state), Query(Pagination::default()))
            .await
            .unwrap();
        assert_eq!(listed.0.len(), 1);
    }

    #[tokio::test]
    async fn test_create_workflow_rejects_empty_name() {
        let result = create_workflow(
            State(state()),
            Json(CreateWorkflowRequest {
                name: String::new(),
                description: None,
            }),
        )
        .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_workflow_is_404() {
        let error = get_workflow(State(state()), Path(42)).await.unwrap_err();
        assert_eq!(error.status, axum::http::StatusCode::NOT_FOUND);
    }
}
