//! PostgreSQL repositories with connection pooling

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::domain::log::{LogRecord, LogRepository, NewLogRecord};
use crate::domain::rules::{GeneratedRules, NewGeneratedRules, RulesRepository};
use crate::domain::workflow::{NewWorkflow, Workflow, WorkflowRepository};
use crate::domain::DomainError;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/etl_insight".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }
}

/// Open a connection pool against the configured database
pub async fn connect_pool(config: &PostgresConfig) -> Result<PgPool, DomainError> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(std::time::Duration::from_secs(config.connect_timeout_secs))
        .idle_timeout(std::time::Duration::from_secs(config.idle_timeout_secs))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
}

/// Create the tables if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), DomainError> {
    let statements = [
        r#"
        CREATE TABLE IF NOT EXISTS workflows (
            id BIGSERIAL PRIMARY KEY,
            name VARCHAR(255) NOT NULL,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS workflow_logs (
            id BIGSERIAL PRIMARY KEY,
            workflow_id BIGINT NOT NULL REFERENCES workflows(id) ON DELETE CASCADE,
            log_type VARCHAR(50) NOT NULL,
            message TEXT NOT NULL,
            timestamp TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
        r#"
        CREATE TABLE IF NOT EXISTS transformation_rules (
            id BIGSERIAL PRIMARY KEY,
            workflow_id BIGINT NOT NULL REFERENCES workflows(id) ON DELETE CASCADE,
            user_query TEXT,
            rules TEXT NOT NULL,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    ];

    for statement in statements {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create tables: {}", e)))?;
    }

    tracing::info!("Database tables ensured");
    Ok(())
}

fn storage_error(e: sqlx::Error) -> DomainError {
    DomainError::storage(e.to_string())
}

fn workflow_from_row(row: &PgRow) -> Result<Workflow, DomainError> {
    Ok(Workflow {
        id: row.try_get("id").map_err(storage_error)?,
        name: row.try_get("name").map_err(storage_error)?,
        description: row.try_get("description").map_err(storage_error)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(storage_error)?,
    })
}

fn log_from_row(row: &PgRow) -> Result<LogRecord, DomainError> {
    Ok(LogRecord {
        id: row.try_get("id").map_err(storage_error)?,
        workflow_id: row.try_get("workflow_id").map_err(storage_error)?,
        log_type: row.try_get("log_type").map_err(storage_error)?,
        message: row.try_get("message").map_err(storage_error)?,
        timestamp: row
            .try_get::<DateTime<Utc>, _>("timestamp")
            .map_err(storage_error)?,
    })
}

fn rules_from_row(row: &PgRow) -> Result<GeneratedRules, DomainError> {
    Ok(GeneratedRules {
        id: row.try_get("id").map_err(storage_error)?,
        workflow_id: row.try_get("workflow_id").map_err(storage_error)?,
        user_query: row
            .try_get::<Option<String>, _>("user_query")
            .map_err(storage_error)?
            .unwrap_or_default(),
        rules_text: row.try_get("rules").map_err(storage_error)?,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(storage_error)?,
    })
}

/// Workflow repository backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresWorkflowRepository {
    pool: PgPool,
}

impl PostgresWorkflowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkflowRepository for PostgresWorkflowRepository {
    async fn get(&self, id: i64) -> Result<Option<Workflow>, DomainError> {
        let row = sqlx::query("SELECT id, name, description, created_at FROM workflows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(storage_error)?;

        row.as_ref().map(workflow_from_row).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Workflow>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, name, description, created_at FROM workflows ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(workflow_from_row).collect()
    }

    async fn create(&self, workflow: NewWorkflow) -> Result<Workflow, DomainError> {
        let row = sqlx::query(
            "INSERT INTO workflows (name, description) VALUES ($1, $2) \
             RETURNING id, name, description, created_at",
        )
        .bind(&workflow.name)
        .bind(&workflow.description)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        workflow_from_row(&row)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM workflows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(storage_error)?;

        Ok(result.rows_affected() > 0)
    }
}

/// Log repository backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresLogRepository {
    pool: PgPool,
}

impl PostgresLogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LogRepository for PostgresLogRepository {
    async fn append(&self, entry: NewLogRecord) -> Result<LogRecord, DomainError> {
        let row = sqlx::query(
            "INSERT INTO workflow_logs (workflow_id, log_type, message) VALUES ($1, $2, $3) \
             RETURNING id, workflow_id, log_type, message, timestamp",
        )
        .bind(entry.workflow_id)
        .bind(&entry.log_type)
        .bind(&entry.message)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        log_from_row(&row)
    }

    async fn list_for_workflow(
        &self,
        workflow_id: i64,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<LogRecord>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, workflow_id, log_type, message, timestamp FROM workflow_logs \
             WHERE workflow_id = $1 ORDER BY timestamp DESC, id DESC OFFSET $2 LIMIT $3",
        )
        .bind(workflow_id)
        .bind(offset.max(0))
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(log_from_row).collect()
    }

    async fn list_recent(
        &self,
        workflow_id: i64,
        limit: i64,
    ) -> Result<Vec<LogRecord>, DomainError> {
        self.list_for_workflow(workflow_id, 0, limit).await
    }

    async fn list_all(&self) -> Result<Vec<LogRecord>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, workflow_id, log_type, message, timestamp FROM workflow_logs \
             ORDER BY timestamp DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(log_from_row).collect()
    }

    async fn delete_older_than(&self, age_days: i64) -> Result<u64, DomainError> {
        let result = sqlx::query(
            "DELETE FROM workflow_logs WHERE timestamp < now() - ($1 * INTERVAL '1 day')",
        )
        .bind(age_days)
        .execute(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(result.rows_affected())
    }
}

/// Generated-rules repository backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PostgresRulesRepository {
    pool: PgPool,
}

impl PostgresRulesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RulesRepository for PostgresRulesRepository {
    async fn save(&self, rules: NewGeneratedRules) -> Result<GeneratedRules, DomainError> {
        let row = sqlx::query(
            "INSERT INTO transformation_rules (workflow_id, user_query, rules) VALUES ($1, $2, $3) \
             RETURNING id, workflow_id, user_query, rules, created_at",
        )
        .bind(rules.workflow_id)
        .bind(&rules.user_query)
        .bind(&rules.rules_text)
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        rules_from_row(&row)
    }

    async fn list_for_workflow(
        &self,
        workflow_id: i64,
        limit: i64,
    ) -> Result<Vec<GeneratedRules>, DomainError> {
        let rows = sqlx::query(
            "SELECT id, workflow_id, user_query, rules, created_at FROM transformation_rules \
             WHERE workflow_id = $1 ORDER BY created_at DESC, id DESC LIMIT $2",
        )
        .bind(workflow_id)
        .bind(limit.max(0))
        .fetch_all(&self.pool)
        .await
        .map_err(storage_error)?;

        rows.iter().map(rules_from_row).collect()
    }
}
