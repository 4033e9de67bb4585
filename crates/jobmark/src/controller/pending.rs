//! Registry of actions currently inside their grace window.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::actions::ActionKind;
use crate::identifier::CanonicalKey;

/// Counts controllers committing each (kind, job) pair.
///
/// Listing views consult this so a card that is visually leaving a filtered
/// list is not re-admitted before the store catches up.
#[derive(Debug, Default)]
pub struct PendingActions {
    entries: RwLock<HashMap<(ActionKind, CanonicalKey), usize>>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, kind: ActionKind, key: CanonicalKey) {
        let mut entries = match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        *entries.entry((kind, key)).or_insert(0) += 1;
    }

    pub fn unregister(&self, kind: ActionKind, key: &CanonicalKey) {
        let mut entries = match self.entries.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let slot = (kind, key.clone());
        if let Some(count) = entries.get_mut(&slot) {
            *count -= 1;
            if *count == 0 {
                entries.remove(&slot);
            }
        }
    }

    pub fn is_pending(&self, kind: ActionKind, key: &CanonicalKey) -> bool {
        let entries = match self.entries.read() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        entries.contains_key(&(kind, key.clone()))
    }

    /// Pending kinds for a job, in `ActionKind` order.
    pub fn kinds_for(&self, key: &CanonicalKey) -> Vec<ActionKind> {
        ActionKind::ALL
            .into_iter()
            .filter(|kind| self.is_pending(*kind, key))
            .collect()
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(g) => g.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
