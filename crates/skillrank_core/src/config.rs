//! File-based configuration for store and logging setup.
//!
//! # Responsibility
//! - Parse the TOML configuration consumed by callers before they open the
//!   store and initialize logging.
//!
//! # Invariants
//! - Every section and key is optional; an empty file equals the default.
//! - Unknown keys are rejected so typos surface early.

use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Root configuration document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SkillRankConfig {
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

/// `[database]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite file path. `None` selects an in-memory database.
    pub path: Option<PathBuf>,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: Option<String>,
    /// Absolute directory for rolling log files. `None` disables file logs.
    pub dir: Option<PathBuf>,
}

impl LoggingConfig {
    /// Configured level, falling back to the build-mode default.
    pub fn effective_level(&self) -> &str {
        self.level.as_deref().unwrap_or(default_log_level())
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl SkillRankConfig {
    /// Parses configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Reads and parses a configuration file.
///
/// # Errors
/// - `ConfigError::Io` when the file cannot be read.
/// - `ConfigError::Parse` when the content is not a valid configuration.
pub fn load_config(path: impl AsRef<Path>) -> Result<SkillRankConfig, ConfigError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    SkillRankConfig::from_toml_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::{load_config, ConfigError, SkillRankConfig};
    use crate::logging::default_log_level;
    use std::path::PathBuf;

    #[test]
    fn empty_document_is_default() {
        let config = SkillRankConfig::from_toml_str("").unwrap();
        assert_eq!(config, SkillRankConfig::default());
        assert!(config.database.path.is_none());
        assert_eq!(config.logging.effective_level(), default_log_level());
    }

    #[test]
    fn parses_all_sections() {
        let config = SkillRankConfig::from_toml_str(
            r#"
            [database]
            path = "/tmp/skillrank.sqlite3"

            [logging]
            level = "warn"
            dir = "/tmp/skillrank-logs"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.database.path,
            Some(PathBuf::from("/tmp/skillrank.sqlite3"))
        );
        assert_eq!(config.logging.effective_level(), "warn");
        assert_eq!(
            config.logging.dir,
            Some(PathBuf::from("/tmp/skillrank-logs"))
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = SkillRankConfig::from_toml_str("[database]\nurl = \"x\"\n").unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn load_config_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_config_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skillrank.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
    }
}
