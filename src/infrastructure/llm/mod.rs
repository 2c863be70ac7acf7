//! LLM provider implementations

pub mod http_client;
mod perplexity;

pub use http_client::{HttpClient, HttpClientTrait};
pub use perplexity::{PerplexityProvider, DEFAULT_PERPLEXITY_BASE_URL};
