//! rclone install check and remote listing service

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, ToolResultExt};
use crate::config::Settings;
use crate::domain::{parse_remotes, RemoteName};
use crate::infrastructure::traits::CommandRunner;

/// Subcommand that prints one configured remote per line.
const LIST_REMOTES_ARG: &str = "listremotes";

/// Talks to the external sync tool.
pub struct RemoteService {
    cmd: Arc<dyn CommandRunner>,
    settings: Arc<Settings>,
}

impl RemoteService {
    /// Create a new remote service.
    pub fn new(cmd: Arc<dyn CommandRunner>, settings: Arc<Settings>) -> Self {
        Self { cmd, settings }
    }

    /// Name of the external tool as configured.
    pub fn tool(&self) -> &str {
        &self.settings.rclone_bin
    }

    /// Resolved location of `program` on the search path, if any.
    pub fn locate(&self, program: &str) -> Option<PathBuf> {
        let found = self.cmd.locate(program);
        debug!("locate: {} -> {:?}", program, found);
        found
    }

    /// True if `program` resolves on the search path.
    pub fn is_installed(&self, program: &str) -> bool {
        self.locate(program).is_some()
    }

    /// Enumerate configured remotes in the order the tool prints them.
    ///
    /// # Errors
    /// - `ToolTimedOut` if the tool runs longer than `list_timeout_secs`
    /// - `ToolFailed` if it exits non-zero (captured stdout is discarded)
    /// - `OperationFailed` if it cannot be spawned
    #[instrument(skip(self))]
    pub fn list_remotes(&self) -> ApplicationResult<Vec<RemoteName>> {
        let program = self.tool();
        let timeout = Duration::from_secs(self.settings.list_timeout_secs);

        let output = self
            .cmd
            .run(program, &[LIST_REMOTES_ARG], timeout)
            .with_tool_context(program, &[LIST_REMOTES_ARG], timeout)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ApplicationError::ToolFailed {
                program: program.to_string(),
                status: output.status.code(),
                stderr: stderr.trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let remotes = parse_remotes(&stdout);
        debug!("list_remotes: found {} remotes", remotes.len());
        Ok(remotes)
    }
}
