//! JSON file backend.
//!
//! Keeps each value in its own pretty-printed file under one directory.
//! Writes go to a sibling temp file first and are renamed into place, so a
//! crash mid-write leaves the previous value intact.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::PersistenceBackend;
use crate::actions::{ActionSetSnapshot, PreferenceSnapshot};
use crate::error::PersistenceError;

const ACTION_SETS_FILE: &str = "action-sets.json";
const PREFERENCES_FILE: &str = "preferences.json";

pub struct JsonFileBackend {
    directory: PathBuf,
}

impl JsonFileBackend {
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn action_sets_path(&self) -> PathBuf {
        self.directory.join(ACTION_SETS_FILE)
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.directory.join(PREFERENCES_FILE)
    }

    fn read<T: DeserializeOwned>(&self, path: &Path) -> Result<Option<T>, PersistenceError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PersistenceError::Read {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        Ok(Some(serde_json::from_str(&content)?))
    }

    fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<(), PersistenceError> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            PersistenceError::CreateDirectory {
                path: self.directory.clone(),
                source: e,
            }
        })?;

        let json = serde_json::to_string_pretty(value)?;
        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, json).map_err(|e| PersistenceError::Write {
            path: tmp_path.clone(),
            source: e,
        })?;
        std::fs::rename(&tmp_path, path).map_err(|e| PersistenceError::Write {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }
}

impl PersistenceBackend for JsonFileBackend {
    fn load_action_sets(&self) -> Result<Option<ActionSetSnapshot>, PersistenceError> {
        self.read(&self.action_sets_path())
    }

    fn save_action_sets(&self, sets: &ActionSetSnapshot) -> Result<(), PersistenceError> {
        self.write(&self.action_sets_path(), sets)
    }

    fn load_preferences(&self) -> Result<Option<PreferenceSnapshot>, PersistenceError> {
        self.read(&self.preferences_path())
    }

    fn save_preferences(&self, prefs: &PreferenceSnapshot) -> Result<(), PersistenceError> {
        self.write(&self.preferences_path(), prefs)
    }

    fn name(&self) -> &'static str {
        "json"
    }
}
