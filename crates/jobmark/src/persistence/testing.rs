//! Backends for exercising stores and controllers under contention.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use super::{MemoryBackend, PersistenceBackend};
use crate::actions::{ActionSetSnapshot, PreferenceSnapshot};
use crate::error::PersistenceError;

/// Memory backend whose first save of either value blocks until released.
pub(crate) struct GatedBackend {
    pub(crate) inner: MemoryBackend,
    gate: Mutex<Option<(Sender<()>, Receiver<()>)>>,
}

/// Signals that the gated save started, and releases it.
pub(crate) struct Gate {
    pub(crate) entered: Receiver<()>,
    pub(crate) release: Sender<()>,
}

impl GatedBackend {
    pub(crate) fn new(inner: MemoryBackend) -> (Arc<Self>, Gate) {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let backend = Arc::new(Self {
            inner,
            gate: Mutex::new(Some((entered_tx, release_rx))),
        });
        (
            backend,
            Gate {
                entered: entered_rx,
                release: release_tx,
            },
        )
    }

    fn pass_gate(&self) {
        let gate = self.gate.lock().unwrap().take();
        if let Some((entered, release)) = gate {
            entered.send(()).unwrap();
            release.recv().unwrap();
        }
    }
}

impl PersistenceBackend for GatedBackend {
    fn load_action_sets(&self) -> Result<Option<ActionSetSnapshot>, PersistenceError> {
        self.inner.load_action_sets()
    }

    fn save_action_sets(&self, sets: &ActionSetSnapshot) -> Result<(), PersistenceError> {
        self.pass_gate();
        self.inner.save_action_sets(sets)
    }

    fn load_preferences(&self) -> Result<Option<PreferenceSnapshot>, PersistenceError> {
        self.inner.load_preferences()
    }

    fn save_preferences(&self, prefs: &PreferenceSnapshot) -> Result<(), PersistenceError> {
        self.pass_gate();
        self.inner.save_preferences(prefs)
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}
