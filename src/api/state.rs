//! Application state for shared services

use std::sync::Arc;

use crate::domain::analysis::AnalysisOrchestrator;
use crate::domain::log::{ErrorSink, LogRepository};
use crate::domain::rules::RulesRepository;
use crate::domain::workflow::WorkflowRepository;

/// Application state shared across handlers. Repositories and the
/// orchestrator are behind `Arc` and hold no per-request mutable state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub workflows: Arc<dyn WorkflowRepository>,
    pub logs: Arc<dyn LogRepository>,
    pub rules: Arc<dyn RulesRepository>,
    pub error_sink: Arc<ErrorSink>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    pub fn new(
        workflows: Arc<dyn WorkflowRepository>,
        logs: Arc<dyn LogRepository>,
        rules: Arc<dyn RulesRepository>,
        error_sink: Arc<ErrorSink>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            workflows,
            logs,
            rules,
            error_sink,
            orchestrator,
        }
    }
}
