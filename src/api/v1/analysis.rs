//! AI analysis endpoints

use axum::extract::State;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use validator::Validate;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json};
use crate::domain::analysis::{analysis_prompt, normalize, Attempt, SuggestedFix};
use crate::domain::log::{LogRecord, LogRepository};
use crate::domain::rules::{NewGeneratedRules, RulesRepository};
use crate::domain::workflow::WorkflowRepository;

/// Number of log lines embedded into the analysis prompt
const RECENT_LOG_LINES: i64 = 5;

/// Request to analyze a workflow's recent logs
#[derive(Debug, Deserialize, Validate)]
pub struct AnalysisQueryRequest {
    pub workflow_id: i64,
    #[validate(length(min = 1, message = "query_text cannot be empty"))]
    pub query_text: String,
}

/// Normalized analysis plus the orchestration trail
#[derive(Debug, Serialize)]
pub struct AnalysisQueryResponse {
    pub transformation_rules: Vec<String>,
    pub error_analysis: String,
    pub suggested_fixes: Vec<SuggestedFix>,
    pub used_model: String,
    pub attempts: Vec<Attempt>,
    pub logs: Vec<LogRecord>,
}

/// Raw prompt passthrough request
#[derive(Debug, Deserialize, Validate)]
pub struct RawPromptRequest {
    #[validate(length(min = 1, message = "prompt cannot be empty"))]
    pub prompt: String,
    pub workflow_id: Option<i64>,
}

/// Raw prompt passthrough response. Failures are reported in-band the way
/// the raw endpoint always has: 200 with has_error set.
#[derive(Debug, Serialize)]
pub struct RawPromptResponse {
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub used_model: Option<String>,
    pub attempts: Vec<Attempt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_info: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub has_error: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// POST /v1/analysis/query
pub async fn query_workflow_analysis(
    State(state): State<AppState>,
    Json(request): Json<AnalysisQueryRequest>,
) -> Result<Json<AnalysisQueryResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    info!(workflow_id = request.workflow_id, "Received analysis query");

    let workflow = state
        .workflows
        .get(request.workflow_id)
        .await
        .map_err(ApiError::from)?
        .ok_or_else(|| ApiError::not_found("Workflow not found").with_param("workflow_id"))?;

    let logs = state
        .logs
        .list_recent(workflow.id, RECENT_LOG_LINES)
        .await
        .map_err(ApiError::from)?;

    let logs_text = logs
        .iter()
        .map(|log| log.message.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = analysis_prompt(&workflow.name, &request.query_text, &logs_text);

    let outcome = state
        .orchestrator
        .query_with_fallback(&prompt, Some(workflow.id))
        .await;

    let (answer, used_model) = match (outcome.answer, outcome.used_model) {
        (Some(answer), Some(used_model)) => (answer, used_model),
        _ => {
            let detail = outcome
                .error
                .unwrap_or_else(|| "All models failed".to_string());
            return Err(ApiError::unavailable(detail));
        }
    };

    let normalized = normalize(&answer);

    // Generated rules are kept for audit; losing one record must not fail
    // the analysis that produced it
    let rules_text = serde_json::to_string(&normalized.transformation_rules).unwrap_or_default();
    if let Err(e) = state
        .rules
        .save(NewGeneratedRules::new(
            workflow.id,
            request.query_text,
            rules_text,
        ))
        .await
    {
        warn!(workflow_id = workflow.id, error = %e, "Failed to persist generated rules");
    }

    Ok(Json(AnalysisQueryResponse {
        transformation_rules: normalized.transformation_rules,
        error_analysis: normalized.error_analysis,
        suggested_fixes: normalized.suggested_fixes,
        used_model,
        attempts: outcome.attempts,
        logs,
    }))
}

/// POST /v1/analysis/prompt
pub async fn raw_prompt(
    State(state): State<AppState>,
    Json(request): Json<RawPromptRequest>,
) -> Result<Json<RawPromptResponse>, ApiError> {
    request
        .validate()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let outcome = state
        .orchestrator
        .query_with_fallback(&request.prompt, request.workflow_id)
        .await;

    let has_error = outcome.error.is_some();
    Ok(Json(RawPromptResponse {
        answer: outcome.answer,
        used_model: outcome.used_model,
        attempts: outcome.attempts,
        error_info: outcome.error,
        has_error,
    }))
}
