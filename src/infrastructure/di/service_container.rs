//! Service container for dependency injection
//!
//! Builds the clean and remote services from one set of settings.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::application::services::{CleanService, RemoteService};
use crate::application::ApplicationResult;
use crate::config::Settings;
use crate::infrastructure::traits::{CommandRunner, FileSystem, RealCommandRunner, RealFileSystem};

/// Settings plus the I/O seams every service is built on.
pub struct ServiceContainer {
    pub settings: Arc<Settings>,
    /// Used by `CleanService`
    pub fs: Arc<dyn FileSystem>,
    /// Used by `RemoteService` to look up and run rclone
    pub cmd: Arc<dyn CommandRunner>,
}

impl ServiceContainer {
    /// Load settings (global config file when `config_file` is `None`) and wire
    /// real implementations.
    pub fn from_config(config_file: Option<&Path>) -> ApplicationResult<Self> {
        let settings = Settings::load(config_file)?;
        debug!("container: rclone_bin={}", settings.rclone_bin);
        Ok(Self::new(settings))
    }

    pub fn new(settings: Settings) -> Self {
        Self::with_deps(
            settings,
            Arc::new(RealFileSystem),
            Arc::new(RealCommandRunner),
        )
    }

    /// Inject custom I/O implementations (tests use fakes for rclone).
    pub fn with_deps(
        settings: Settings,
        fs: Arc<dyn FileSystem>,
        cmd: Arc<dyn CommandRunner>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            fs,
            cmd,
        }
    }

    pub fn clean_service(&self) -> CleanService {
        CleanService::new(Arc::clone(&self.fs))
    }

    pub fn remote_service(&self) -> RemoteService {
        RemoteService::new(Arc::clone(&self.cmd), Arc::clone(&self.settings))
    }
}
