use std::sync::Mutex;

use super::PersistenceBackend;
use crate::actions::{ActionSetSnapshot, PreferenceSnapshot};
use crate::error::PersistenceError;

/// Session-only backend. Values live as long as the backend does.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    action_sets: Mutex<Option<ActionSetSnapshot>>,
    preferences: Mutex<Option<PreferenceSnapshot>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds stored values.
    pub fn with_values(
        action_sets: Option<ActionSetSnapshot>,
        preferences: Option<PreferenceSnapshot>,
    ) -> Self {
        Self {
            action_sets: Mutex::new(action_sets),
            preferences: Mutex::new(preferences),
        }
    }
}

impl PersistenceBackend for MemoryBackend {
    fn load_action_sets(&self) -> Result<Option<ActionSetSnapshot>, PersistenceError> {
        let guard = self
            .action_sets
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(guard.clone())
    }

    fn save_action_sets(&self, sets: &ActionSetSnapshot) -> Result<(), PersistenceError> {
        let mut guard = self
            .action_sets
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        *guard = Some(sets.clone());
        Ok(())
    }

    fn load_preferences(&self) -> Result<Option<PreferenceSnapshot>, PersistenceError> {
        let guard = self
            .preferences
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        Ok(*guard)
    }

    fn save_preferences(&self, prefs: &PreferenceSnapshot) -> Result<(), PersistenceError> {
        let mut guard = self
            .preferences
            .lock()
            .map_err(|_| PersistenceError::LockPoisoned)?;
        *guard = Some(*prefs);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_backend_reports_first_run() {
        let backend = MemoryBackend::new();
        assert!(backend.load_action_sets().unwrap().is_none());
        assert!(backend.load_preferences().unwrap().is_none());
    }

    #[test]
    fn test_save_then_load() {
        let backend = MemoryBackend::new();
        let sets = ActionSetSnapshot {
            favorites: vec!["007".to_string()],
            ..Default::default()
        };
        backend.save_action_sets(&sets).unwrap();
        assert_eq!(backend.load_action_sets().unwrap(), Some(sets));

        let prefs = PreferenceSnapshot {
            hide: true,
            ..Default::default()
        };
        backend.save_preferences(&prefs).unwrap();
        assert_eq!(backend.load_preferences().unwrap(), Some(prefs));
    }
}
