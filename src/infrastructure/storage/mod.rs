//! Storage implementations: PostgreSQL and in-memory

pub mod in_memory;
pub mod postgres;
pub mod seed;

pub use in_memory::{InMemoryLogRepository, InMemoryRulesRepository, InMemoryWorkflowRepository};
pub use postgres::{
    connect_pool, ensure_schema, PostgresConfig, PostgresLogRepository, PostgresRulesRepository,
    PostgresWorkflowRepository,
};
pub use seed::insert_sample_data;
