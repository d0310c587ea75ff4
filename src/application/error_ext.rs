//! Error conversion helpers for filesystem and subprocess results

use std::io;
use std::path::Path;
use std::time::Duration;

use crate::application::{ApplicationError, ApplicationResult};

/// Attach the path being worked on to an I/O failure.
pub trait IoResultExt<T> {
    /// ```ignore
    /// fs.remove_dir_all(&entry)
    ///     .with_path_context("remove directory", &entry)?;
    /// ```
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn with_path_context(self, action: &str, path: &Path) -> ApplicationResult<T> {
        self.map_err(|e| ApplicationError::OperationFailed {
            context: format!("{}: {}", action, path.display()),
            source: Box::new(e),
        })
    }
}

/// Classify a failed external tool invocation.
pub trait ToolResultExt<T> {
    /// `TimedOut` becomes `ToolTimedOut`, anything else (spawn failure,
    /// broken pipe) becomes `OperationFailed` naming the command line.
    fn with_tool_context(
        self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> ApplicationResult<T>;
}

impl<T> ToolResultExt<T> for io::Result<T> {
    fn with_tool_context(
        self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> ApplicationResult<T> {
        self.map_err(|e| match e.kind() {
            io::ErrorKind::TimedOut => ApplicationError::ToolTimedOut {
                program: program.to_string(),
                timeout,
            },
            _ => ApplicationError::OperationFailed {
                context: format!("run {} {}", program, args.join(" ")),
                source: Box::new(e),
            },
        })
    }
}
