//! Workflow log endpoints: listing, appending, CSV export, pruning

use axum::extract::{Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::log::{LogRecord, LogRepository, NewLogRecord};
use crate::domain::workflow::WorkflowRepository;

use super::workflows::Pagination;

/// Request to append a log record to a workflow
#[derive(Debug, Deserialize, Validate)]
pub struct AppendLogRequest {
    #[validate(length(min = 1, max = 50, message = "log_type must be 1-50 characters"))]
    pub log_type: String,
    #[validate(length(min = 1, message = "message cannot be empty"))]
    pub message: String,
}

/// Parameters for age-based pruning
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PruneParams {
    pub older_than_days: i64,
}

impl Default for PruneParams {
    fn default() -> Self {
        Self { older_than_days: 30 }
    }
}

/// Response from a prune call
#[derive(Debug, Serialize)]
pub struct PruneResponse {
    pub deleted: u64,
}

/// GET /v1/workflows/:workflow_id/logs
pub async fn list_workflow_logs(
    State(state): State<AppState>,
    Path(workflow_id): Path<i64>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let logs = state
        .logs
        .list_for_workflow(workflow_id, pagination.skip, pagination.limit)
        .await
        .map_err(ApiError::from)?;

    if logs.is_empty() {
        return Err(ApiError::not_found("No logs found for this workflow"));
    }

    Ok(Json(logs))
}

/// POST /v1/workflows/:workflow_id/logs
pub async fn append_workflow_log(
    State(state): State<AppState>,
    Path(workflow_id): Path<i64>,
    Json(request): Json<AppendLogRequest>,
) -> Result<Json<LogRecord>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    if !state
        .workflows
        .exists(workflow_id)
        .await
        .map_err(ApiError::from)?
    {
        return Err(ApiError::not_found("Workflow not found").with_param("workflow_id"));
    }

    let record = state
        .logs
        .append(NewLogRecord::new(
            workflow_id,
            request.log_type,
            request.message,
        ))
        .await
        .map_err(ApiError::from)?;

    debug!(workflow_id, log_id = record.id, "Appended workflow log");
    Ok(Json(record))
}

/// GET /v1/logs
pub async fn list_all_logs(
    State(state): State<AppState>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let logs = state.logs.list_all().await.map_err(ApiError::from)?;
    Ok(Json(logs))
}

/// DELETE /v1/logs?older_than_days=N
pub async fn prune_logs(
    State(state): State<AppState>,
    Query(params): Query<PruneParams>,
) -> Result<Json<PruneResponse>, ApiError> {
    if params.older_than_days < 0 {
        return Err(ApiError::bad_request("older_than_days must be non-negative")
            .with_param("older_than_days"));
    }

    let deleted = state.error_sink.prune_older_than(params.older_than_days).await;
    Ok(Json(PruneResponse { deleted }))
}

/// GET /v1/workflows/:workflow_id/logs/export
pub async fn export_workflow_logs(
    State(state): State<AppState>,
    Path(workflow_id): Path<i64>,
) -> Result<Response, ApiError> {
    let logs = state
        .logs
        .list_for_workflow(workflow_id, 0, i64::MAX)
        .await
        .map_err(ApiError::from)?;

    if logs.is_empty() {
        return Err(ApiError::not_found("No error logs found"));
    }

    let csv = logs_to_csv(&logs);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=workflow_{}_error_logs.csv", workflow_id),
            ),
        ],
        csv,
    )
        .into_response())
}

/// Render log records as CSV, newest first, with a header row
fn logs_to_csv(logs: &[LogRecord]) -> String {
    let mut out = String::from("Timestamp,Error Type,Log Message\r\n");

    for log in logs {
        out.push_str(&csv_field(&log.timestamp.to_rfc3339()));
        out.push(',');
        out.push_str(&csv_field(&log.log_type));
        out.push(',');
        out.push_str(&csv_field(&log.message));
        out.push_str("\r\n");
    }

    out
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
fn csv_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
