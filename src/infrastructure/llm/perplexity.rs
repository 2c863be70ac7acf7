//! Perplexity chat-completions provider

use async_trait::async_trait;
use serde::Deserialize;

use super::http_client::HttpClientTrait;
use crate::domain::{DomainError, LlmProvider, LlmRequest, LlmResponse, Message};
use crate::domain::llm::Usage;

pub const DEFAULT_PERPLEXITY_BASE_URL: &str = "https://api.perplexity.ai";

/// Perplexity API provider speaking the OpenAI-compatible wire format
#[derive(Debug)]
pub struct PerplexityProvider<C: HttpClientTrait> {
    client: C,
    auth_header: String,
    base_url: String,
}

impl<C: HttpClientTrait> PerplexityProvider<C> {
    /// Construction fails without an API key; there is no anonymous access
    pub fn new(client: C, api_key: impl Into<String>) -> Result<Self, DomainError> {
        Self::with_base_url(client, api_key, DEFAULT_PERPLEXITY_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(DomainError::configuration("Perplexity API key is required"));
        }
        if !api_key.starts_with("pplx-") {
            tracing::warn!("Perplexity API key format may be invalid (usually starts with pplx-)");
        }

        Ok(Self {
            client,
            auth_header: format!("Bearer {}", api_key),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": model,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(temp) = request.temperature {
            body["temperature"] = serde_json::json!(temp);
        }

        if let Some(max_tokens) = request.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        if let Some(top_p) = request.top_p {
            body["top_p"] = serde_json::json!(top_p);
        }

        body
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![
            ("Authorization", self.auth_header.as_str()),
            ("Content-Type", "application/json"),
        ]
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: PerplexityResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("perplexity", format!("Failed to parse response: {}", e))
        })?;

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::provider("perplexity", "No choices in response"))?;

        let message = Message::assistant(choice.message.content.unwrap_or_default());

        let mut llm_response = LlmResponse::new(response.id, response.model, message);

        if let Some(usage) = response.usage {
            llm_response = llm_response.with_usage(Usage::new(
                usage.prompt_tokens,
                usage.completion_tokens,
            ));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for PerplexityProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.chat_completions_url();
        let body = self.build_request(model, &request);
        let response = self
            .client
            .post_json(&url, self.headers(), &body, request.timeout)
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "perplexity"
    }
}

#[derive(Debug, Deserialize)]
struct PerplexityResponse {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    choices: Vec<PerplexityChoice>,
    usage: Option<PerplexityUsage>,
}

#[derive(Debug, Deserialize)]
struct PerplexityChoice {
    message: PerplexityMessage,
}

#[derive(Debug, Deserialize)]
struct PerplexityMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PerplexityUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::http_client::mock::MockHttpClient;
    use serde_json::json;

    const URL: &str = "https://api.perplexity.ai/chat/completions";

    fn chat_response(content: &str) -> serde_json::Value {
        json!({
            "id": "resp-1",
            "model": "sonar-large-chat",
            "choices": [{"message": {"role": "assistant", "content": content}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 34}
        })
    }

    #[test]
    fn test_construction_requires_api_key() {
        assert!(PerplexityProvider::new(MockHttpClient::new(), "").is_err());
        assert!(PerplexityProvider::new(MockHttpClient::new(), "pplx-abc").is_ok());
    }

    #[tokio::test]
    async fn test_chat_builds_wire_request() {
        let client = MockHttpClient::new().with_response(URL, chat_response("{}"));
        let provider = PerplexityProvider::new(client, "pplx-abc").unwrap();

        let request = LlmRequest::builder()
            .system("structured output only")
            .user("analyze")
            .temperature(0.1)
            .max_tokens(4096)
            .top_p(0.9)
            .build();

        let response = provider.chat("sonar-large-chat", request).await.unwrap();
        assert_eq!(response.content(), Some("{}"));
        assert_eq!(response.usage.unwrap().total_tokens, 46);
    }

    #[tokio::test]
    async fn test_chat_wire_body_shape() {
        let client = MockHttpClient::new().with_response(URL, chat_response("{}"));
        let provider = PerplexityProvider::new(client, "pplx-abc").unwrap();

        let request = LlmRequest::builder()
            .system("s")
            .user("u")
            .temperature(0.1)
            .max_tokens(2048)
            .top_p(0.9)
            .build();
        provider.chat("sonar-small-online", request).await.unwrap();

        let bodies = provider.client.requests();
        assert_eq!(bodies.len(), 1);
        let body = &bodies[0];
        assert_eq!(body["model"], "sonar-small-online");
        assert_eq!(body["stream"], false);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["max_tokens"], 2048);
    }

    #[tokio::test]
    async fn test_chat_rejects_empty_choices() {
        let client = MockHttpClient::new()
            .with_response(URL, json!({"id": "r", "model": "m", "choices": []}));
        let provider = PerplexityProvider::new(client, "pplx-abc").unwrap();

        let error = provider
            .chat("sonar-large-chat", LlmRequest::builder().user("u").build())
            .await
            .unwrap_err();
        assert!(error.to_string().contains("No choices"));
    }

    #[tokio::test]
    async fn test_chat_propagates_transport_errors() {
        let client = MockHttpClient::new().with_error(URL, "connection refused");
        let provider = PerplexityProvider::new(client, "pplx-abc").unwrap();

        let error = provider
            .chat("sonar-large-chat", LlmRequest::builder().user("u").build())
            .await
            .unwrap_err();
        assert!(error.to_string().contains("connection refused"));
    }
}
