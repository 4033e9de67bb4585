//! SQLite backend.
//!
//! Both values are stored as JSON text in a small key/value table, so the
//! on-disk payload has the same shape as the JSON file backend.

use std::path::Path;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::PersistenceBackend;
use crate::actions::{ActionSetSnapshot, PreferenceSnapshot};
use crate::error::PersistenceError;

pub mod migrations;

const ACTION_SETS_KEY: &str = "action_sets";
const PREFERENCES_KEY: &str = "preferences";

/// Thread-safe handle around a single connection. Cloning is cheap.
#[derive(Clone)]
pub struct SqliteBackend {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteBackend {
    /// Opens (or creates) the database at `path` and runs pending migrations.
    pub fn open(path: &Path) -> Result<Self, PersistenceError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PersistenceError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        migrations::run_all(&conn)?;

        log::info!("Action state database opened at {}", path.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Opens an in-memory database. Runs all migrations.
    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        let conn = Connection::open_in_memory()?;
        migrations::run_all(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, PersistenceError> {
        let conn = self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM ui_state WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match value {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(value)?;
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().map_err(|_| PersistenceError::LockPoisoned)?;
        conn.execute(
            "INSERT INTO ui_state (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, json, now],
        )?;
        Ok(())
    }
}

impl PersistenceBackend for SqliteBackend {
    fn load_action_sets(&self) -> Result<Option<ActionSetSnapshot>, PersistenceError> {
        self.get(ACTION_SETS_KEY)
    }

    fn save_action_sets(&self, sets: &ActionSetSnapshot) -> Result<(), PersistenceError> {
        self.put(ACTION_SETS_KEY, sets)
    }

    fn load_preferences(&self) -> Result<Option<PreferenceSnapshot>, PersistenceError> {
        self.get(PREFERENCES_KEY)
    }

    fn save_preferences(&self, prefs: &PreferenceSnapshot) -> Result<(), PersistenceError> {
        self.put(PREFERENCES_KEY, prefs)
    }

    fn name(&self) -> &'static str {
        "sqlite"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_memory_first_run() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        assert!(backend.load_action_sets().unwrap().is_none());
        assert!(backend.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_overwrite_keeps_single_row() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let mut sets = ActionSetSnapshot::default();
        sets.hidden.push("042".to_string());
        backend.save_action_sets(&sets).unwrap();
        sets.hidden.push("mock-hid-1".to_string());
        backend.save_action_sets(&sets).unwrap();

        assert_eq!(backend.load_action_sets().unwrap(), Some(sets));

        let conn = backend.conn.lock().unwrap();
        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM ui_state", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db").join("jobmark.db");

        {
            let backend = SqliteBackend::open(&path).unwrap();
            backend
                .save_preferences(&PreferenceSnapshot {
                    archive: true,
                    ..Default::default()
                })
                .unwrap();
        }

        let backend = SqliteBackend::open(&path).unwrap();
        let prefs = backend.load_preferences().unwrap().unwrap();
        assert!(prefs.archive);
        assert!(!prefs.hide);
    }
}
