//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::exitcode;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("program {0} is not installed or is not in PATH")]
    ToolMissing(String),

    #[error("check of runtime parameters failed for unknown reason")]
    Unmatched,
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => exitcode::USAGE,
            CliError::ToolMissing(_) => exitcode::UNAVAILABLE,
            CliError::Unmatched => exitcode::MISC,
            CliError::Application(e) => match e {
                ApplicationError::DirectoryNotFound(_) | ApplicationError::NotADirectory(_) => {
                    exitcode::DIR
                }
                ApplicationError::ToolFailed { .. } | ApplicationError::ToolTimedOut { .. } => {
                    exitcode::SOFTWARE
                }
                ApplicationError::Config { .. } => exitcode::CONFIG,
                ApplicationError::OperationFailed { .. } => exitcode::MISC,
            },
        }
    }

    /// User-correctable conditions are reported as warnings, the rest as errors.
    pub fn is_warning(&self) -> bool {
        match self {
            CliError::Usage(_) | CliError::ToolMissing(_) | CliError::Unmatched => true,
            CliError::Application(e) => matches!(
                e,
                ApplicationError::DirectoryNotFound(_)
                    | ApplicationError::NotADirectory(_)
                    | ApplicationError::OperationFailed { .. }
            ),
            CliError::InvalidArgs(_) => false,
        }
    }
}
