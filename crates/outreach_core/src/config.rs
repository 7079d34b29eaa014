//! Process configuration resolved from the environment.
//!
//! # Responsibility
//! - Resolve database path and logging settings with stable defaults.
//!
//! # Invariants
//! - Resolution reads through an injected lookup, so tests never touch the
//!   real process environment.
//! - Blank variables count as unset.

use crate::logging::{default_log_level, init_logging, LogLevel};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "OUTREACH_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "OUTREACH_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "OUTREACH_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "outreach.sqlite3";

/// Resolved configuration shared by the API and CLI entry points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    pub db_path: PathBuf,
    pub log_level: LogLevel,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            log_level: default_log_level(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    /// Resolves configuration from the process environment.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves configuration from an arbitrary key lookup.
    ///
    /// # Errors
    /// - `OUTREACH_LOG_LEVEL` holds an unknown level.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(path) = read(DB_PATH_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = read(LOG_LEVEL_ENV) {
            config.log_level = level.parse()?;
        }
        config.log_dir = read(LOG_DIR_ENV).map(PathBuf::from);
        Ok(config)
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` when logging stays disabled.
    pub fn init_logging(&self) -> Result<bool, String> {
        match &self.log_dir {
            Some(dir) => init_logging(self.log_level, dir).map(|()| true),
            None => Ok(false),
        }
    }
}

/// Default database location: `outreach.sqlite3` in the system temp dir.
pub fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{default_db_path, CoreConfig, DB_PATH_ENV, LOG_DIR_ENV, LOG_LEVEL_ENV};
    use crate::logging::{default_log_level, LogLevel};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let config = CoreConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, default_db_path());
        assert_eq!(config.log_level, default_log_level());
        assert!(config.log_dir.is_none());
        assert_eq!(config.init_logging(), Ok(false));
    }

    #[test]
    fn environment_overrides_each_field() {
        let config = CoreConfig::from_lookup(lookup(&[
            (DB_PATH_ENV, "/var/lib/outreach/data.sqlite3"),
            (LOG_LEVEL_ENV, "WARN"),
            (LOG_DIR_ENV, "/var/log/outreach"),
        ]))
        .unwrap();
        assert_eq!(
            config.db_path,
            PathBuf::from("/var/lib/outreach/data.sqlite3")
        );
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/outreach")));
    }

    #[test]
    fn blank_values_are_ignored_and_bad_levels_rejected() {
        let config = CoreConfig::from_lookup(lookup(&[(DB_PATH_ENV, "   ")])).unwrap();
        assert_eq!(config.db_path, default_db_path());

        let err = CoreConfig::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")])).unwrap_err();
        assert!(err.contains("unsupported log level"));
    }
}
