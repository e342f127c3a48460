//! Store configuration.
//!
//! # Responsibility
//! - Resolve where the durable slot lives and which key holds the snapshot.
//!
//! # Invariants
//! - Environment overrides win over defaults; blank values are ignored.
//! - A resolved config always has a non-empty path and key.

use crate::persistence::{SlotPersistence, SlotResult, SqliteSlot, DEFAULT_STORAGE_KEY};
use crate::store::task_store::{SqliteTaskStore, TaskStore};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Overrides the database file path.
pub const DB_PATH_ENV: &str = "LAZYTASK_DB_PATH";
/// Overrides the slot key holding the task snapshot.
pub const STORAGE_KEY_ENV: &str = "LAZYTASK_STORAGE_KEY";
const DEFAULT_DB_FILE_NAME: &str = "lazytask.sqlite3";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyDbPath,
    EmptyStorageKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDbPath => write!(f, "db_path cannot be empty"),
            Self::EmptyStorageKey => write!(f, "storage_key cannot be empty"),
        }
    }
}

impl Error for ConfigError {}

/// Location of the persisted task snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    db_path: PathBuf,
    storage_key: String,
}

impl StoreConfig {
    /// Validated explicit config.
    ///
    /// # Errors
    /// Rejects blank paths and blank keys.
    pub fn new(db_path: &str, storage_key: &str) -> Result<Self, ConfigError> {
        let db_path = db_path.trim();
        if db_path.is_empty() {
            return Err(ConfigError::EmptyDbPath);
        }
        let storage_key = storage_key.trim();
        if storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        Ok(Self {
            db_path: PathBuf::from(db_path),
            storage_key: storage_key.to_string(),
        })
    }

    /// Resolves config from process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves config from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Self {
            db_path: non_blank(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(default_db_path),
            storage_key: non_blank(STORAGE_KEY_ENV)
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Opens the SQLite slot and returns a hydrated store.
    ///
    /// # Errors
    /// Fails only when the database cannot be opened or migrated.
    pub fn open_store(&self) -> SlotResult<SqliteTaskStore> {
        let slot = SqliteSlot::open(&self.db_path)?;
        Ok(TaskStore::open(SlotPersistence::with_key(
            slot,
            self.storage_key.clone(),
        )))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

fn default_db_path() -> PathBuf {
    std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, StoreConfig, DB_PATH_ENV, STORAGE_KEY_ENV};
    use std::path::Path;

    #[test]
    fn lookup_overrides_defaults_and_ignores_blanks() {
        let config = StoreConfig::from_lookup(|name| match name {
            DB_PATH_ENV => Some(" /data/tasks.db ".to_string()),
            STORAGE_KEY_ENV => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.db_path(), Path::new("/data/tasks.db"));
        assert_eq!(config.storage_key(), "tasks");
    }

    #[test]
    fn empty_lookup_uses_temp_dir_default() {
        let config = StoreConfig::from_lookup(|_| None);
        assert_eq!(config, StoreConfig::default());
        assert!(config.db_path().ends_with("lazytask.sqlite3"));
    }

    #[test]
    fn new_rejects_blank_values() {
        assert_eq!(
            StoreConfig::new("  ", "tasks").unwrap_err(),
            ConfigError::EmptyDbPath
        );
        assert_eq!(
            StoreConfig::new("/tmp/x.db", "").unwrap_err(),
            ConfigError::EmptyStorageKey
        );
    }
}
