//! Model catalog and fallback-chain ordering

mod catalog;

pub use catalog::{
    build_fallback_chain, ModelCatalog, ModelConfig, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_PRIMARY_MODEL, DEFAULT_TEMPERATURE,
};
