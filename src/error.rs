//! Error type for allocation operations.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors produced by [`Allocator`](crate::allocator::Allocator),
/// [`JobBoard`](crate::jobs::JobBoard), export and configuration.
#[derive(Debug, Error)]
pub enum AllocationError {
    #[error("invalid input: {}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
    #[error("unknown individual '{0}'")]
    UnknownIndividual(String),
    #[error("individual '{0}' already has a task in progress")]
    AlreadyAssigned(String),
    #[error("individual '{0}' has no task in progress")]
    NotAssigned(String),
    #[error("individual '{0}' is not accepting work")]
    Unavailable(String),
    #[error("unknown job '{0}'")]
    UnknownJob(String),
    #[error("job '{0}' is already allocated")]
    JobAlreadyAssigned(String),
    #[error("invalid date/time '{input}': expected {expected}")]
    InvalidDateTime {
        input: String,
        expected: &'static str,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<Vec<ValidationError>> for AllocationError {
    fn from(errors: Vec<ValidationError>) -> Self {
        AllocationError::Invalid(errors)
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias for allocation operations.
pub type Result<T> = std::result::Result<T, AllocationError>;
