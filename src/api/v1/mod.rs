//! v1 API endpoints

pub mod analysis;
pub mod logs;
pub mod models;
pub mod workflows;

use axum::{
    routing::{get, post},
    Router,
};

use super::state::AppState;

/// Create v1 API router
pub fn create_v1_router() -> Router<AppState> {
    Router::new()
        .route(
            "/workflows",
            get(workflows::list_workflows).post(workflows::create_workflow),
        )
        .route("/workflows/{workflow_id}", get(workflows::get_workflow))
        .route(
            "/workflows/{workflow_id}/logs",
            get(logs::list_workflow_logs).post(logs::append_workflow_log),
        )
        .route(
            "/workflows/{workflow_id}/logs/export",
            get(logs::export_workflow_logs),
        )
        .route("/logs", get(logs::list_all_logs).delete(logs::prune_logs))
        .route("/analysis/query", post(analysis::query_workflow_analysis))
        .route("/analysis/prompt", post(analysis::raw_prompt))
        .route("/models", get(models::get_model_info))
        .route("/models/health", get(models::model_health))
}
