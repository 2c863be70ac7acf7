//! Domain layer: entities, repository traits, and the analysis core

pub mod analysis;
mod error;
pub mod llm;
pub mod log;
pub mod model;
pub mod rules;
pub mod workflow;

pub use analysis::{
    normalize, validate_structure, AnalysisOrchestrator, Attempt, FallbackOutcome, ModelInvoker,
    NormalizedAnalysis, SuggestedFix,
};
pub use error::DomainError;
pub use llm::{LlmProvider, LlmRequest, LlmResponse, Message, MessageRole};
pub use log::{ErrorSink, LogRecord, LogRepository, NewLogRecord};
pub use model::{build_fallback_chain, ModelCatalog, ModelConfig};
pub use rules::{GeneratedRules, NewGeneratedRules, RulesRepository};
pub use workflow::{NewWorkflow, Workflow, WorkflowRepository};
