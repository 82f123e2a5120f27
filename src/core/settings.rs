//! Settings file management
//!
//! Reads optional logging defaults from `config.toml` in the config
//! directory. Command-line flags take precedence over anything set here.

use crate::config::defaults::{DEFAULT_TIMESTAMP_FORMAT, DEFAULT_VERBOSITY};
use crate::core::logger::Severity;
use crate::error::SettingsError;
use crate::infra::dirs::ScriptDirs;
use crate::infra::rotating::RotationPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Settings for scripts built on scriptkit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Logging defaults
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Logging defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Minimum severity when `--verbosity` is not given
    pub verbosity: Option<Severity>,

    /// Rotation threshold of the log file in bytes
    pub max_bytes: Option<u64>,

    /// Number of rotated log files kept
    pub backups: Option<usize>,

    /// Allow colored console output
    pub color: Option<bool>,

    /// Timestamp format of leveled records
    pub timestamp_format: Option<String>,
}

impl Settings {
    /// Load settings from the default location
    ///
    /// If the file doesn't exist, returns defaults.
    pub fn load(dirs: &ScriptDirs) -> Result<Self, SettingsError> {
        Self::load_from_path(&dirs.settings_path())
    }

    /// Load settings from a specific path
    ///
    /// A missing file yields defaults; an unreadable or invalid file is an
    /// error.
    pub fn load_from_path(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| SettingsError::ReadError {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| SettingsError::ParseError {
            path: path.display().to_string(),
            error: e.to_string(),
        })
    }

    /// Effective minimum severity, preferring the command-line value
    #[must_use]
    pub fn verbosity(&self, cli: Option<Severity>) -> Severity {
        cli.or(self.logging.verbosity).unwrap_or(DEFAULT_VERBOSITY)
    }

    /// Effective log rotation policy
    #[must_use]
    pub fn rotation(&self) -> RotationPolicy {
        let defaults = RotationPolicy::default();
        RotationPolicy {
            max_bytes: self.logging.max_bytes.unwrap_or(defaults.max_bytes),
            backups: self.logging.backups.unwrap_or(defaults.backups),
        }
    }

    /// Whether colors are allowed at all
    #[must_use]
    pub fn color(&self) -> bool {
        self.logging.color.unwrap_or(true)
    }

    /// Effective record timestamp format
    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        self.logging
            .timestamp_format
            .as_deref()
            .unwrap_or(DEFAULT_TIMESTAMP_FORMAT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.verbosity(None), Severity::Error);
        assert_eq!(settings.rotation(), RotationPolicy::default());
        assert!(settings.color());
        assert_eq!(settings.timestamp_format(), DEFAULT_TIMESTAMP_FORMAT);
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from_path(&temp_dir.path().join("config.toml")).unwrap();
        assert!(settings.logging.verbosity.is_none());
    }

    #[test]
    fn test_load_from_dirs() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("config.toml"),
            "[logging]\nbackups = 5\n",
        )
        .unwrap();

        let dirs = ScriptDirs::with_config_dir(temp_dir.path().to_path_buf());
        let settings = Settings::load(&dirs).unwrap();
        assert_eq!(settings.rotation().backups, 5);
    }

    #[test]
    fn test_load_valid_settings() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");

        let content = r#"
[logging]
verbosity = "INFO"
max_bytes = 1024
backups = 3
color = false
timestamp_format = "%H:%M"
"#;
        fs::write(&path, content).unwrap();

        let settings = Settings::load_from_path(&path).unwrap();
        assert_eq!(settings.verbosity(None), Severity::Info);
        assert_eq!(
            settings.rotation(),
            RotationPolicy {
                max_bytes: 1024,
                backups: 3
            }
        );
        assert!(!settings.color());
        assert_eq!(settings.timestamp_format(), "%H:%M");
    }

    #[test]
    fn test_cli_verbosity_overrides_settings() {
        let settings = Settings {
            logging: LoggingSettings {
                verbosity: Some(Severity::Info),
                ..LoggingSettings::default()
            },
        };
        assert_eq!(settings.verbosity(Some(Severity::Debug)), Severity::Debug);
        assert_eq!(settings.verbosity(None), Severity::Info);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "invalid toml [[[").unwrap();

        let result = Settings::load_from_path(&path);
        assert!(matches!(result, Err(SettingsError::ParseError { .. })));
    }

    #[test]
    fn test_unknown_verbosity_is_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "[logging]\nverbosity = \"LOUD\"\n").unwrap();

        assert!(Settings::load_from_path(&path).is_err());
    }
}
