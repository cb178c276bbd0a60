//! Error types for the schedule engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid event payload: {0}")]
    InvalidEvents(String),

    #[error("Calendar source error: {0}")]
    Source(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
