//! ETL workflow entity and repository

mod entity;
pub mod repository;

pub use entity::{validate_workflow_name, NewWorkflow, Workflow, MAX_NAME_LENGTH};
pub use repository::WorkflowRepository;
