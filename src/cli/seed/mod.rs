//! Seed command - inserts sample data for local development

use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging;
use crate::infrastructure::storage::insert_sample_data;

/// Insert sample workflows and logs into the configured store
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let repositories = crate::create_repositories(&config).await?;
    let inserted =
        insert_sample_data(repositories.workflows.as_ref(), repositories.logs.as_ref()).await?;

    info!(workflows = inserted, "Seeding finished");
    Ok(())
}
