//! Test harness for isolated controller and store tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;

use jobmark::{
    ActionKind, ActionServices, ActionSetSnapshot, ConfirmationOutcome, Confirmer,
    JsonFileBackend, MemoryBackend, PersistenceBackend, PreferenceSnapshot, SqliteBackend,
};

pub const GRACE: Duration = Duration::from_millis(3000);

/// Confirmer that answers with a fixed outcome and records every prompt.
pub struct RecordingConfirmer {
    outcome: ConfirmationOutcome,
    prompts: Mutex<Vec<ActionKind>>,
}

impl RecordingConfirmer {
    pub fn new(outcome: ConfirmationOutcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<ActionKind> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Confirmer for RecordingConfirmer {
    async fn present_confirmation(&self, kind: ActionKind) -> ConfirmationOutcome {
        self.prompts.lock().unwrap().push(kind);
        self.outcome
    }
}

/// Isolated environment: a temp directory plus services over one backend.
pub struct TestHarness {
    temp_dir: TempDir,
    pub state_dir: PathBuf,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let state_dir = temp_dir.path().join("state");
        Self {
            temp_dir,
            state_dir,
        }
    }

    /// Services over a fresh in-memory backend.
    pub fn memory_services(
        seed: ActionSetSnapshot,
        prefs: PreferenceSnapshot,
    ) -> ActionServices {
        let backend = Arc::new(MemoryBackend::with_values(None, Some(prefs)));
        ActionServices::new(backend, seed, 3).with_grace_period(GRACE)
    }

    pub fn json_backend(&self) -> Arc<dyn PersistenceBackend> {
        Arc::new(JsonFileBackend::new(&self.state_dir))
    }

    pub fn sqlite_backend(&self) -> Arc<dyn PersistenceBackend> {
        Arc::new(
            SqliteBackend::open(&self.state_dir.join("jobmark.db"))
                .expect("Failed to open SQLite backend"),
        )
    }

    /// Services over `backend`, as a fresh session would build them.
    pub fn services(
        &self,
        backend: Arc<dyn PersistenceBackend>,
        seed: ActionSetSnapshot,
    ) -> ActionServices {
        ActionServices::new(backend, seed, 3).with_grace_period(GRACE)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

pub fn skip_all() -> PreferenceSnapshot {
    PreferenceSnapshot {
        hide: true,
        favorite: true,
        archive: true,
    }
}
