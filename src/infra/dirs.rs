//! Platform-specific directory management
//!
//! Locates the settings file. Follows the XDG Base Directory Specification
//! on Linux and standard locations on macOS.
//!
//! The `SCRIPTKIT_CONFIG_DIR` environment variable overrides the default
//! config directory.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the config directory
pub const ENV_CONFIG_DIR: &str = "SCRIPTKIT_CONFIG_DIR";

/// Application name used in directory paths
const APP_NAME: &str = "scriptkit";

/// Settings file name inside the config directory
const SETTINGS_FILE: &str = "config.toml";

/// Platform-specific directory provider for scriptkit
#[derive(Debug, Clone)]
pub struct ScriptDirs {
    config_dir: PathBuf,
}

impl ScriptDirs {
    /// Create a new `ScriptDirs` instance
    ///
    /// Checks the environment first, then falls back to platform defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
        }
    }

    /// Create a `ScriptDirs` rooted at an explicit config directory
    #[must_use]
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    /// Get the config directory path
    ///
    /// - Linux: `$XDG_CONFIG_HOME/scriptkit` or `~/.config/scriptkit`
    /// - macOS: `~/Library/Application Support/scriptkit`
    #[must_use]
    pub fn config_dir(&self) -> PathBuf {
        self.config_dir.clone()
    }

    /// Get the settings file path
    #[must_use]
    pub fn settings_path(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(path) = env::var(ENV_CONFIG_DIR) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
    }
}

impl Default for ScriptDirs {
    fn default() -> Self {
        Self::new()
    }
}
