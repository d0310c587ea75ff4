//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `$XDG_CONFIG_HOME/rcloneit/rcloneit.toml` (or an explicit path)
//! 3. Environment variables: `RCLONEIT_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Default seconds to wait for `rclone listremotes`.
pub const DEFAULT_LIST_TIMEOUT_SECS: u64 = 30;

/// Unified configuration for rcloneit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// External sync tool executable (default: rclone)
    pub rclone_bin: String,
    /// Landing zone suggested when `--clean` is given without `--localfs` (never cleaned implicitly)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_dir: Option<PathBuf>,
    /// Upper bound for `rclone listremotes` in seconds
    pub list_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rclone_bin: "rclone".into(),
            landing_dir: None,
            list_timeout_secs: DEFAULT_LIST_TIMEOUT_SECS,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub rclone_bin: Option<String>,
    pub landing_dir: Option<PathBuf>,
    pub list_timeout_secs: Option<u64>,
}

/// Get the XDG config directory for rcloneit.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rcloneit").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("rcloneit.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        if let Some(dir) = &self.landing_dir {
            let expanded = expand_env_vars(dir.to_string_lossy().as_ref());
            self.landing_dir = Some(PathBuf::from(expanded));
        }
        self.rclone_bin = expand_env_vars(&self.rclone_bin);
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            rclone_bin: overlay
                .rclone_bin
                .clone()
                .unwrap_or_else(|| self.rclone_bin.clone()),
            landing_dir: overlay
                .landing_dir
                .clone()
                .or_else(|| self.landing_dir.clone()),
            list_timeout_secs: overlay.list_timeout_secs.unwrap_or(self.list_timeout_secs),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; `None` uses the global XDG location
    ///
    /// An explicit file must exist. The global file is optional.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Config file
        match config_file {
            Some(path) => {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        let raw = load_raw_settings(&global_path)?;
                        current = current.merge_with(&raw);
                    }
                }
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current)?;

        current.expand_paths();

        if current.list_timeout_secs == 0 {
            return Err(ApplicationError::Config {
                message: "list_timeout_secs must be greater than zero".into(),
            });
        }

        Ok(current)
    }

    /// Apply RCLONEIT_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("RCLONEIT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("rclone_bin") {
            settings.rclone_bin = val;
        }
        if let Ok(val) = config.get_string("landing_dir") {
            settings.landing_dir = Some(PathBuf::from(val));
        }
        match config.get::<u64>("list_timeout_secs") {
            Ok(val) => settings.list_timeout_secs = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
