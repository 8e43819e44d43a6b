//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

/// Domain errors represent pipeline failures.
/// These are independent of CLI and terminal concerns.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("source not available: {0}")]
    SourceUnavailable(PathBuf),

    #[error("malformed input: {reason}")]
    MalformedInput { reason: String },

    #[error("validation failed with {} problem(s)", errors.len())]
    ValidationFailed { errors: Vec<String> },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
