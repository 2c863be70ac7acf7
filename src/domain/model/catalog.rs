//! Fixed catalog of Perplexity models and fallback-chain ordering

use once_cell::sync::Lazy;
use serde::Serialize;
use tracing::warn;

/// Generation limits applied when a model is not in the catalog
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

/// Model used when the configured primary is not in the catalog
pub const DEFAULT_PRIMARY_MODEL: &str = "sonar-large-chat";

/// Per-model generation configuration
#[derive(Debug, Clone, Serialize)]
pub struct ModelConfig {
    pub name: &'static str,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub description: &'static str,
}

/// Immutable model catalog, ordered by fallback preference
#[derive(Debug, Clone)]
pub struct ModelCatalog {
    configs: Vec<ModelConfig>,
}

/// The Sonar catalog, ordered by fallback preference: strongest static
/// reasoning first, fastest online model last.
static SONAR_CATALOG: Lazy<ModelCatalog> = Lazy::new(|| {
    ModelCatalog::new(vec![
        ModelConfig {
            name: "sonar-large-chat",
            max_output_tokens: 4096,
            temperature: 0.1,
            description: "Perplexity Sonar Large Chat - Strong reasoning without web search (static internal knowledge)",
        },
        ModelConfig {
            name: "sonar-large-online",
            max_output_tokens: 4096,
            temperature: 0.1,
            description: "Perplexity Sonar Large Online - High-quality reasoning with real-time web access",
        },
        ModelConfig {
            name: "llama-3.1-70b-versatile",
            max_output_tokens: 4096,
            temperature: 0.1,
            description: "Llama 3.1 70B - High-quality reasoning for complex log analysis (static internal knowledge)",
        },
        ModelConfig {
            name: "sonar-small-online",
            max_output_tokens: 4096,
            temperature: 0.1,
            description: "Perplexity Sonar Small Online - Fast, efficient option with real-time web access",
        },
    ])
});

impl ModelCatalog {
    pub fn new(configs: Vec<ModelConfig>) -> Self {
        Self { configs }
    }

    /// The built-in Sonar catalog
    pub fn sonar() -> &'static Self {
        &SONAR_CATALOG
    }

    /// Look up a model's configuration by name
    pub fn get(&self, name: &str) -> Option<&ModelConfig> {
        self.configs.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Model names in fallback preference order
    pub fn fallback_order(&self) -> Vec<&str> {
        self.configs.iter().map(|c| c.name).collect()
    }

    pub fn configs(&self) -> &[ModelConfig] {
        &self.configs
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }

    /// Generation parameters for a model, with conservative defaults for
    /// names outside the catalog
    pub fn generation_params(&self, name: &str) -> (u32, f32) {
        match self.get(name) {
            Some(config) => (config.max_output_tokens, config.temperature),
            None => (DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE),
        }
    }

    /// Validate a configured primary model against the catalog allow-list,
    /// falling back to the default when it is unknown
    pub fn validate_primary(&self, requested: &str) -> String {
        if self.contains(requested) {
            requested.to_string()
        } else {
            warn!(
                requested = %requested,
                fallback = %DEFAULT_PRIMARY_MODEL,
                "Configured primary model is not in the catalog, using default"
            );
            DEFAULT_PRIMARY_MODEL.to_string()
        }
    }
}

/// Build the ordered model chain for one orchestration call: the primary
/// first, then the remaining catalog models in fallback order. The primary
/// is never duplicated.
pub fn build_fallback_chain(primary: &str, catalog: &ModelCatalog) -> Vec<String> {
    std::iter::once(primary)
        .chain(
            catalog
                .fallback_order()
                .into_iter()
                .filter(|name| *name != primary),
        )
        .map(str::to_string)
        .collect()
}
