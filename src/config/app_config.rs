use serde::Deserialize;

use crate::domain::model::DEFAULT_PRIMARY_MODEL;

/// Default provider endpoint, overridable for tests and proxies
const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub database: DatabaseConfig,
    pub perplexity: PerplexityConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Database configuration. A missing URL means the service starts with
/// in-memory storage instead of PostgreSQL.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

/// Perplexity provider configuration. The API key is required to construct
/// the invoker; the model is validated against the catalog allow-list.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PerplexityConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl Default for PerplexityConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_PRIMARY_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Plain env vars win over nothing, not over explicit APP__ settings
        if app_config.perplexity.api_key.is_none() {
            app_config.perplexity.api_key = std::env::var("PERPLEXITY_API_KEY").ok();
        }
        if let Ok(model) = std::env::var("PERPLEXITY_MODEL") {
            if app_config.perplexity.model == DEFAULT_PRIMARY_MODEL {
                app_config.perplexity.model = model;
            }
        }
        if app_config.database.url.is_none() {
            app_config.database.url = std::env::var("DATABASE_URL").ok();
        }

        Ok(app_config)
    }
}
