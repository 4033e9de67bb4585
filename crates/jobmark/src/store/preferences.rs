//! Skip-confirmation preferences.

use std::sync::{Arc, RwLock, RwLockWriteGuard};

use crate::actions::{ActionKind, PreferenceSnapshot};
use crate::persistence::PersistenceBackend;
use crate::store::save_order::SaveOrder;

/// Per-kind "don't ask again" flags, persisted across sessions.
pub struct PreferenceStore {
    prefs: RwLock<PreferenceSnapshot>,
    backend: Arc<dyn PersistenceBackend>,
    save_order: SaveOrder,
}

impl PreferenceStore {
    /// Loads stored preferences. Missing or unreadable values fall back to
    /// all-false.
    pub fn load(backend: Arc<dyn PersistenceBackend>) -> Self {
        let prefs = match backend.load_preferences() {
            Ok(Some(stored)) => stored,
            Ok(None) => PreferenceSnapshot::default(),
            Err(e) => {
                log::error!(
                    "Failed to load preferences from {} backend, using defaults: {}",
                    backend.name(),
                    e
                );
                PreferenceSnapshot::default()
            }
        };

        Self {
            prefs: RwLock::new(prefs),
            backend,
            save_order: SaveOrder::default(),
        }
    }

    pub fn get(&self, kind: ActionKind) -> bool {
        self.snapshot().get(kind)
    }

    pub fn set(&self, kind: ActionKind, value: bool) {
        let (snapshot, ticket) = {
            let mut guard = self.write();
            if guard.get(kind) == value {
                return;
            }
            guard.set(kind, value);
            (*guard, self.save_order.ticket())
        };

        log::info!("Skip confirmation for {} set to {}", kind, value);
        self.persist(ticket, &snapshot);
    }

    /// Clears every skip flag.
    pub fn reset(&self) {
        let snapshot = PreferenceSnapshot::default();
        let ticket = {
            let mut guard = self.write();
            *guard = snapshot;
            self.save_order.ticket()
        };
        self.persist(ticket, &snapshot);
    }

    pub fn snapshot(&self) -> PreferenceSnapshot {
        match self.prefs.read() {
            Ok(g) => *g,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, PreferenceSnapshot> {
        match self.prefs.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Preference lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn persist(&self, ticket: u64, snapshot: &PreferenceSnapshot) {
        match self
            .save_order
            .save(ticket, || self.backend.save_preferences(snapshot))
        {
            Ok(true) => {}
            Ok(false) => log::debug!("Skipped stale preference save"),
            Err(e) => log::error!("Failed to persist preferences: {}", e),
        }
    }
}
