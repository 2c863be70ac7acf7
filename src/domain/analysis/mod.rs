//! AI-assisted log analysis: fallback orchestration and response shaping

mod attempt;
mod invoker;
mod normalizer;
mod orchestrator;
mod prompt;

pub use attempt::Attempt;
pub use invoker::{ModelInvoker, ANALYSIS_TIMEOUT, PROBE_TIMEOUT};
pub use normalizer::{
    normalize, validate_structure, NormalizedAnalysis, SuggestedFix,
    DEFAULT_ANALYSIS_PLACEHOLDER, DEFAULT_RULES_PLACEHOLDER,
};
pub use orchestrator::{
    AnalysisOrchestrator, FallbackOutcome, ModelHealthReport, ModelInfo, ModelProbeResult,
    ProbeStatus,
};
pub use prompt::{analysis_prompt, ANALYST_SYSTEM_PROMPT};
