//! Single-model invocation against the provider

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use super::prompt::ANALYST_SYSTEM_PROMPT;
use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::log::{ErrorSink, API_ERROR_LOG_TYPE};
use crate::domain::model::ModelCatalog;
use crate::domain::DomainError;

/// Fail-safe timeout for analysis calls
pub const ANALYSIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Shorter timeout for lightweight health probes
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Performs exactly one provider request per call. Never retries; the
/// fallback chain is the only retry mechanism.
pub struct ModelInvoker {
    provider: Arc<dyn LlmProvider>,
    catalog: Arc<ModelCatalog>,
    sink: Arc<ErrorSink>,
}

impl std::fmt::Debug for ModelInvoker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelInvoker")
            .field("provider", &self.provider.provider_name())
            .finish()
    }
}

impl ModelInvoker {
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        catalog: Arc<ModelCatalog>,
        sink: Arc<ErrorSink>,
    ) -> Self {
        Self {
            provider,
            catalog,
            sink,
        }
    }

    /// Query one named model. Returns (answer, error); exactly one side is
    /// populated. Provider failures are forwarded to the error sink when a
    /// workflow id is present, without ever failing the invocation itself.
    pub async fn invoke(
        &self,
        prompt: &str,
        model_name: &str,
        workflow_id: Option<i64>,
    ) -> (Option<String>, Option<String>) {
        let (max_tokens, temperature) = self.catalog.generation_params(model_name);

        let request = LlmRequest::builder()
            .system(ANALYST_SYSTEM_PROMPT)
            .user(prompt)
            .temperature(temperature)
            .max_tokens(max_tokens)
            .top_p(0.9)
            .timeout(ANALYSIS_TIMEOUT)
            .build();

        info!(model = %model_name, "Querying Perplexity model");

        let result = self
            .provider
            .chat(model_name, request)
            .await
            .and_then(|response| {
                response
                    .content()
                    .map(strip_code_fences)
                    .ok_or_else(|| DomainError::provider("perplexity", "Response carried no content"))
            });

        match result {
            Ok(content) => {
                info!(model = %model_name, "Successfully got response from Perplexity model");
                (Some(content), None)
            }
            Err(e) => {
                let error_message =
                    format!("Perplexity API error with model {}: {}", model_name, e);
                if let Some(workflow_id) = workflow_id {
                    self.sink
                        .record_error(workflow_id, API_ERROR_LOG_TYPE, &error_message)
                        .await;
                }
                error!(model = %model_name, error = %error_message, "Model invocation failed");
                (None, Some(error_message))
            }
        }
    }

    /// Lightweight health probe: a trivial prompt with a short deadline.
    /// Probe failures are not forwarded to the sink.
    pub async fn probe(&self, model_name: &str) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .user("Say 'OK'")
            .max_tokens(10)
            .timeout(PROBE_TIMEOUT)
            .build();

        let response = self.provider.chat(model_name, request).await?;
        Ok(response.content().unwrap_or_default().to_string())
    }
}

/// Strip the code-fence wrappers some models add around structured text
fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.trim();

    if let Some(rest) = cleaned.strip_prefix("```json") {
        cleaned = rest.trim();
    }
    if let Some(rest) = cleaned.strip_prefix("```") {
        cleaned = rest.trim();
    }
    if let Some(rest) = cleaned.strip_suffix("```") {
        cleaned = rest.trim();
    }

    cleaned.to_string()
}
