mod app_config;

pub use app_config::{
    AppConfig, DatabaseConfig, LogFormat, LoggingConfig, PerplexityConfig, ServerConfig,
};
