//! ETL Insight API
//!
//! A backend service that stores ETL-workflow metadata and error logs in
//! PostgreSQL and augments them with AI-generated analysis, querying the
//! Perplexity chat-completions API with an ordered model fallback chain.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use tracing::{error, info, warn};

use api::state::AppState;
use domain::analysis::{AnalysisOrchestrator, ModelInvoker};
use domain::log::{ErrorSink, LogRepository};
use domain::model::ModelCatalog;
use domain::rules::RulesRepository;
use domain::workflow::WorkflowRepository;
use domain::DomainError;
use infrastructure::llm::{HttpClient, PerplexityProvider};
use infrastructure::storage::{
    connect_pool, ensure_schema, InMemoryLogRepository, InMemoryRulesRepository,
    InMemoryWorkflowRepository, PostgresConfig, PostgresLogRepository, PostgresRulesRepository,
    PostgresWorkflowRepository,
};

/// The repository set backing the API, either PostgreSQL or in-memory
pub struct Repositories {
    pub workflows: Arc<dyn WorkflowRepository>,
    pub logs: Arc<dyn LogRepository>,
    pub rules: Arc<dyn RulesRepository>,
}

impl Repositories {
    fn in_memory() -> Self {
        Self {
            workflows: Arc::new(InMemoryWorkflowRepository::new()),
            logs: Arc::new(InMemoryLogRepository::new()),
            rules: Arc::new(InMemoryRulesRepository::new()),
        }
    }
}

/// Build repositories from configuration. A missing database URL or a failed
/// connection degrades to in-memory storage instead of refusing to start.
pub async fn create_repositories(config: &AppConfig) -> anyhow::Result<Repositories> {
    let Some(url) = &config.database.url else {
        warn!("Database configuration missing. Starting with in-memory storage.");
        return Ok(Repositories::in_memory());
    };

    let pg_config = PostgresConfig {
        url: url.clone(),
        max_connections: config.database.max_connections,
        min_connections: config.database.min_connections,
        connect_timeout_secs: config.database.connect_timeout_secs,
        idle_timeout_secs: config.database.idle_timeout_secs,
    };

    match connect_pool(&pg_config).await {
        Ok(pool) => {
            ensure_schema(&pool).await?;
            info!("Database connection pool created");
            Ok(Repositories {
                workflows: Arc::new(PostgresWorkflowRepository::new(pool.clone())),
                logs: Arc::new(PostgresLogRepository::new(pool.clone())),
                rules: Arc::new(PostgresRulesRepository::new(pool)),
            })
        }
        Err(e) => {
            error!(error = %e, "Failed to create database pool. Starting with in-memory storage.");
            Ok(Repositories::in_memory())
        }
    }
}

/// Build the full application state. Fails when the provider API key is
/// missing; everything else degrades with a warning.
pub async fn create_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let repositories = create_repositories(config).await?;

    let api_key = config
        .perplexity
        .api_key
        .clone()
        .ok_or_else(|| DomainError::configuration("PERPLEXITY_API_KEY is required"))?;

    let provider = PerplexityProvider::with_base_url(
        HttpClient::new(),
        api_key,
        &config.perplexity.base_url,
    )?;

    let error_sink = Arc::new(ErrorSink::new(repositories.logs.clone()));
    let catalog = Arc::new(ModelCatalog::sonar().clone());
    let invoker = ModelInvoker::new(Arc::new(provider), catalog.clone(), error_sink.clone());
    let orchestrator = Arc::new(AnalysisOrchestrator::new(
        invoker,
        catalog,
        config.perplexity.model.clone(),
    )?);

    info!(primary_model = %orchestrator.primary_model(), "Application state created");

    Ok(AppState::new(
        repositories.workflows,
        repositories.logs,
        repositories.rules,
        error_sink,
        orchestrator,
    ))
}
