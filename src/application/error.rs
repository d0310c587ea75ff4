//! Application-level errors

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors raised by the clean and remote services and by config loading.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("{program} exited with {}: {stderr}", describe_status(.status))]
    ToolFailed {
        program: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("{program} did not finish within {}s", .timeout.as_secs())]
    ToolTimedOut { program: String, timeout: Duration },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("status {code}"),
        None => "no status (killed by signal)".to_string(),
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
