//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    App(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::App(ApplicationError::Domain(e))
    }
}

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Serialize(_) => crate::exitcode::SOFTWARE,
            CliError::App(e) => match e {
                ApplicationError::Domain(DomainError::SourceUnavailable(_)) => {
                    crate::exitcode::NOINPUT
                }
                ApplicationError::Domain(DomainError::MalformedInput { .. })
                | ApplicationError::Domain(DomainError::ValidationFailed { .. })
                | ApplicationError::PayloadTooLarge { .. }
                | ApplicationError::UnsupportedUpload(_) => crate::exitcode::DATAERR,
            },
        }
    }
}
