//! Fallback-chain orchestration over the model catalog
//!
//! Models are tried strictly in chain order, one attempt each, stopping at
//! the first structurally valid answer. The chain is sequential on purpose:
//! priority order and per-provider cost both depend on never racing models
//! against each other.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::attempt::Attempt;
use super::invoker::ModelInvoker;
use super::normalizer::validate_structure;
use crate::domain::model::{build_fallback_chain, ModelCatalog, ModelConfig};
use crate::domain::DomainError;

/// Number of chain models exercised by a health check
const PROBED_MODELS: usize = 2;

/// Result of one fallback-chain traversal. Exactly one of `answer`/`error`
/// is populated; `attempts` records every model actually invoked, in order.
#[derive(Debug, Clone, Serialize)]
pub struct FallbackOutcome {
    pub answer: Option<String>,
    pub error: Option<String>,
    pub used_model: Option<String>,
    pub attempts: Vec<Attempt>,
}

/// Probe status for a single model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Unhealthy,
}

/// Health-probe result for a single model
#[derive(Debug, Clone, Serialize)]
pub struct ModelProbeResult {
    pub model: String,
    pub status: ProbeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregated provider health across the probed chain prefix
#[derive(Debug, Clone, Serialize)]
pub struct ModelHealthReport {
    pub overall_status: ProbeStatus,
    pub available_models: Vec<String>,
    pub model_details: Vec<ModelProbeResult>,
}

/// Catalog summary exposed on the models endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub primary_model: String,
    pub fallback_chain: Vec<String>,
    pub available_models: Vec<ModelConfig>,
}

/// Drives the ordered model chain for analysis queries
pub struct AnalysisOrchestrator {
    invoker: ModelInvoker,
    catalog: Arc<ModelCatalog>,
    primary_model: String,
}

impl std::fmt::Debug for AnalysisOrchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisOrchestrator")
            .field("primary_model", &self.primary_model)
            .finish()
    }
}

impl AnalysisOrchestrator {
    /// Create an orchestrator over the given catalog. An empty catalog is a
    /// configuration error; an unknown primary model falls back to the
    /// catalog default with a warning.
    pub fn new(
        invoker: ModelInvoker,
        catalog: Arc<ModelCatalog>,
        primary_model: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if catalog.is_empty() {
            return Err(DomainError::configuration("No models configured"));
        }

        let primary_model = catalog.validate_primary(&primary_model.into());

        Ok(Self {
            invoker,
            catalog,
            primary_model,
        })
    }

    pub fn primary_model(&self) -> &str {
        &self.primary_model
    }

    /// Try the chain in order until one model returns a structurally valid
    /// answer. Each model gets exactly one attempt; a parseable-but-non-object
    /// reply is a recoverable failure, not an abort.
    pub async fn query_with_fallback(
        &self,
        prompt: &str,
        workflow_id: Option<i64>,
    ) -> FallbackOutcome {
        let chain = build_fallback_chain(&self.primary_model, &self.catalog);

        let mut attempts = Vec::with_capacity(chain.len());
        let mut last_error: Option<String> = None;

        for model_name in &chain {
            let (answer, invoke_error) = self.invoker.invoke(prompt, model_name, workflow_id).await;

            match answer {
                Some(answer) if validate_structure(&answer) => {
                    attempts.push(Attempt::succeeded(model_name));
                    info!(
                        model = %model_name,
                        attempts = attempts.len(),
                        "Model produced a structurally valid response"
                    );
                    return FallbackOutcome {
                        answer: Some(answer),
                        error: None,
                        used_model: Some(model_name.clone()),
                        attempts,
                    };
                }
                Some(_) => {
                    let reason = format!("Model {} returned invalid structured format", model_name);
                    warn!(model = %model_name, "Invalid structured format, trying next model");
                    attempts.push(Attempt::failed(model_name, reason.clone()));
                    last_error = Some(reason);
                }
                None => {
                    let reason = invoke_error
                        .unwrap_or_else(|| format!("Model {} returned no response", model_name));
                    warn!(model = %model_name, "Model failed, trying next model");
                    attempts.push(Attempt::failed(model_name, reason.clone()));
                    last_error = Some(reason);
                }
            }
        }

        let trail = attempts
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        let error_msg = format!(
            "All models failed. Attempts: [{}]. Last error: {}",
            trail,
            last_error.as_deref().unwrap_or("none")
        );
        error!(error = %error_msg, "Fallback chain exhausted");

        FallbackOutcome {
            answer: None,
            error: Some(error_msg),
            used_model: None,
            attempts,
        }
    }

    /// Probe the first models of the catalog order with a short deadline
    pub async fn health_check(&self) -> ModelHealthReport {
        let mut model_details = Vec::with_capacity(PROBED_MODELS);

        for model_name in self.catalog.fallback_order().into_iter().take(PROBED_MODELS) {
            let detail = match self.invoker.probe(model_name).await {
                Ok(response) => ModelProbeResult {
                    model: model_name.to_string(),
                    status: ProbeStatus::Healthy,
                    response: Some(response),
                    error: None,
                },
                Err(e) => ModelProbeResult {
                    model: model_name.to_string(),
                    status: ProbeStatus::Unhealthy,
                    response: None,
                    error: Some(e.to_string()),
                },
            };
            model_details.push(detail);
        }

        let available_models: Vec<String> = model_details
            .iter()
            .filter(|d| d.status == ProbeStatus::Healthy)
            .map(|d| d.model.clone())
            .collect();

        ModelHealthReport {
            overall_status: if available_models.is_empty() {
                ProbeStatus::Unhealthy
            } else {
                ProbeStatus::Healthy
            },
            available_models,
            model_details,
        }
    }

    /// Catalog summary: primary, fallback order, per-model configuration
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            primary_model: self.primary_model.clone(),
            fallback_chain: self
                .catalog
                .fallback_order()
                .into_iter()
                .map(str::to_string)
                .collect(),
            available_models: self.catalog.configs().to_vec(),
        }
    }
}
