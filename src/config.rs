//! Shortcut manager configuration
//!
//! Read from `~/.config/localshortcut/config.yaml` when present. Only the
//! manager's own behaviour is configured here; bindings are never persisted.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shortcut::Platform;

/// Errors that can occur when loading a configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Behaviour of a [`ShortcutManager`](crate::shortcut::ShortcutManager)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShortcutConfig {
    /// Platform used to resolve `CmdOrCtrl`; `None` detects the current one
    pub platform: Option<Platform>,
    /// Send malformed accelerators to the diagnostic sink
    pub report_invalid_accelerators: bool,
    /// Attach a backtrace of the offending call to each diagnostic
    pub capture_backtraces: bool,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            platform: None,
            report_invalid_accelerators: true,
            capture_backtraces: true,
        }
    }
}

impl ShortcutConfig {
    /// Effective platform for chord equivalence
    pub fn platform(&self) -> Platform {
        self.platform.unwrap_or_else(Platform::current)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load config from a specific file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Load config from the default location, or return defaults if not found
    pub fn load_default() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{}", e);
                Self::default()
            }
        }
    }
}
