//! Model catalog endpoints

use axum::extract::State;
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::Json;
use crate::domain::analysis::{ModelHealthReport, ModelInfo};

/// GET /v1/models
pub async fn get_model_info(State(state): State<AppState>) -> Json<ModelInfo> {
    debug!("Listing model catalog");
    Json(state.orchestrator.model_info())
}

/// GET /v1/models/health
pub async fn model_health(State(state): State<AppState>) -> Json<ModelHealthReport> {
    debug!("Probing provider health");
    Json(state.orchestrator.health_check().await)
}
