//! Pluggable persistence for action sets and preferences.
//!
//! Backends are synchronous. Stores call them after mutating their in-memory
//! copy and only log failures, so a backend never has to be transactional.

use crate::actions::{ActionSetSnapshot, PreferenceSnapshot};
use crate::error::PersistenceError;

pub mod json_file;
pub mod memory;
pub mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

pub use json_file::JsonFileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

/// Storage for the two persisted values.
///
/// `Ok(None)` from a load means nothing has been stored yet, which callers
/// treat as a first run.
pub trait PersistenceBackend: Send + Sync {
    fn load_action_sets(&self) -> Result<Option<ActionSetSnapshot>, PersistenceError>;

    fn save_action_sets(&self, sets: &ActionSetSnapshot) -> Result<(), PersistenceError>;

    fn load_preferences(&self) -> Result<Option<PreferenceSnapshot>, PersistenceError>;

    fn save_preferences(&self, prefs: &PreferenceSnapshot) -> Result<(), PersistenceError>;

    /// Short name used in log lines.
    fn name(&self) -> &'static str;
}
