//! Action set store with write-through persistence.

use std::collections::HashSet;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::actions::{ActionKind, ActionSetSnapshot};
use crate::identifier::{normalize, CanonicalKey, JobId};
use crate::persistence::PersistenceBackend;
use crate::store::save_order::SaveOrder;

/// Width numeric ids are zero-padded to when first stored.
pub const DEFAULT_PAD_WIDTH: usize = 3;

/// The three favorite/archived/hidden sets shared by every controller.
///
/// Stored entries keep whatever string they were saved with, so legacy
/// entries like `"7"` and `"007"` stay valid. Every lookup normalizes both
/// sides. Mutations update memory first and then persist best-effort; the
/// in-memory copy is authoritative for the session. Saves land in mutation
/// order, so the stored copy never falls behind a later toggle.
pub struct ActionSetStore {
    sets: RwLock<ActionSetSnapshot>,
    backend: Arc<dyn PersistenceBackend>,
    save_order: SaveOrder,
    pad_width: usize,
}

impl ActionSetStore {
    /// Loads the stored sets, seeding from `seed` on first run.
    ///
    /// A failed load starts from `seed` without writing it back, so a
    /// transient read error never clobbers the stored value.
    pub fn load(
        backend: Arc<dyn PersistenceBackend>,
        seed: ActionSetSnapshot,
        pad_width: usize,
    ) -> Self {
        let sets = match backend.load_action_sets() {
            Ok(Some(stored)) => {
                log::debug!(
                    "Loaded action sets from {} backend ({} favorites, {} archived, {} hidden)",
                    backend.name(),
                    stored.favorites.len(),
                    stored.archived.len(),
                    stored.hidden.len()
                );
                stored
            }
            Ok(None) => {
                log::info!(
                    "No stored action sets in {} backend, seeding defaults",
                    backend.name()
                );
                if let Err(e) = backend.save_action_sets(&seed) {
                    log::error!("Failed to persist seeded action sets: {}", e);
                }
                seed
            }
            Err(e) => {
                log::error!(
                    "Failed to load action sets from {} backend, using defaults for this session: {}",
                    backend.name(),
                    e
                );
                seed
            }
        };

        Self {
            sets: RwLock::new(sets),
            backend,
            save_order: SaveOrder::default(),
            pad_width,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, ActionSetSnapshot> {
        match self.sets.read() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Action set lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, ActionSetSnapshot> {
        match self.sets.write() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Action set lock was poisoned, recovering");
                poisoned.into_inner()
            }
        }
    }

    /// Flips membership of `id` in the `kind` set and returns the new
    /// membership.
    ///
    /// Removal drops the first stored entry whose normalized form matches;
    /// insertion stores the zero-padded form of `id`.
    pub fn toggle(&self, kind: ActionKind, id: &JobId) -> bool {
        let key = id.key();

        let (member, snapshot, ticket) = {
            let mut sets = self.write();
            let entries = sets.entries_mut(kind);
            let member = match entries.iter().position(|stored| normalize(stored) == key) {
                Some(index) => {
                    entries.remove(index);
                    false
                }
                None => {
                    entries.push(id.padded(self.pad_width));
                    true
                }
            };
            (member, sets.clone(), self.save_order.ticket())
        };

        log::debug!(
            "Toggled {} for job {} (member: {})",
            kind,
            id,
            member
        );

        match self
            .save_order
            .save(ticket, || self.backend.save_action_sets(&snapshot))
        {
            Ok(true) => {}
            Ok(false) => log::debug!("Skipped stale action set save for {}", kind),
            Err(e) => {
                log::error!("Failed to persist action sets after toggling {}: {}", kind, e)
            }
        }

        member
    }

    pub fn contains(&self, kind: ActionKind, id: &JobId) -> bool {
        self.contains_key(kind, &id.key())
    }

    pub fn contains_key(&self, kind: ActionKind, key: &CanonicalKey) -> bool {
        self.read()
            .entries(kind)
            .iter()
            .any(|stored| &normalize(stored) == key)
    }

    /// Stored entries for `kind`, in insertion order.
    pub fn all(&self, kind: ActionKind) -> Vec<String> {
        self.read().entries(kind).to_vec()
    }

    /// Canonical keys for `kind`, for bulk membership checks.
    pub fn keys(&self, kind: ActionKind) -> HashSet<CanonicalKey> {
        self.read()
            .entries(kind)
            .iter()
            .map(|stored| normalize(stored))
            .collect()
    }

    pub fn snapshot(&self) -> ActionSetSnapshot {
        self.read().clone()
    }

    pub fn pad_width(&self) -> usize {
        self.pad_width
    }
}
