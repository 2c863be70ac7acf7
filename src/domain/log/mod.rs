//! Workflow log records and the best-effort error sink

mod entity;
pub mod repository;
mod sink;

pub use entity::{LogRecord, NewLogRecord, API_ERROR_LOG_TYPE};
pub use repository::LogRepository;
pub use sink::ErrorSink;
