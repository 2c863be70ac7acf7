//! AI-generated transformation rules

mod entity;
pub mod repository;

pub use entity::{GeneratedRules, NewGeneratedRules};
pub use repository::RulesRepository;
