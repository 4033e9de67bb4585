//! Shared services injected into every controller.

use std::sync::Arc;
use std::time::Duration;

use crate::actions::ActionSetSnapshot;
use crate::config::{Config, PersistenceKind};
use crate::confirm::{AutoConfirm, Confirmer};
use crate::controller::{ActionController, PendingActions};
use crate::error::Result;
use crate::identifier::JobId;
use crate::notify::ActionNotifier;
use crate::persistence::{JsonFileBackend, MemoryBackend, PersistenceBackend, SqliteBackend};
use crate::store::{ActionSetStore, PreferenceStore};

/// Default grace window between acceptance and commit.
pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_millis(3000);

const SQLITE_FILE: &str = "jobmark.db";

/// Process-wide singletons shared by every controller. Cloning is cheap.
#[derive(Clone)]
pub struct ActionServices {
    pub action_sets: Arc<ActionSetStore>,
    pub preferences: Arc<PreferenceStore>,
    pub pending: Arc<PendingActions>,
    pub notifier: ActionNotifier,
    pub confirmer: Arc<dyn Confirmer>,
    pub grace_period: Duration,
}

impl ActionServices {
    /// Loads both stores from `backend`, seeding action sets on first run.
    ///
    /// Starts with the default grace period and an [`AutoConfirm`] that
    /// accepts every prompt; hosts with a dialog swap it via
    /// [`with_confirmer`](Self::with_confirmer).
    pub fn new(
        backend: Arc<dyn PersistenceBackend>,
        seed: ActionSetSnapshot,
        pad_width: usize,
    ) -> Self {
        Self {
            action_sets: Arc::new(ActionSetStore::load(backend.clone(), seed, pad_width)),
            preferences: Arc::new(PreferenceStore::load(backend)),
            pending: Arc::new(PendingActions::new()),
            notifier: ActionNotifier::default(),
            confirmer: Arc::new(AutoConfirm::default()),
            grace_period: DEFAULT_GRACE_PERIOD,
        }
    }

    /// Builds services from a validated configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend = open_backend(config)?;
        log::info!(
            "Action services using {} backend, grace period {} ms",
            backend.name(),
            config.grace_period_ms
        );

        Ok(Self::new(backend, config.seed.clone(), config.pad_width)
            .with_grace_period(Duration::from_millis(config.grace_period_ms)))
    }

    pub fn with_confirmer(mut self, confirmer: Arc<dyn Confirmer>) -> Self {
        self.confirmer = confirmer;
        self
    }

    pub fn with_grace_period(mut self, grace_period: Duration) -> Self {
        self.grace_period = grace_period;
        self
    }

    /// Creates the controller for one job card.
    pub fn controller(&self, id: impl Into<JobId>) -> ActionController {
        ActionController::new(id, self.clone())
    }
}

fn open_backend(config: &Config) -> Result<Arc<dyn PersistenceBackend>> {
    let persistence = &config.persistence;
    match persistence.backend {
        PersistenceKind::Memory => Ok(Arc::new(MemoryBackend::new())),
        PersistenceKind::Json => {
            let dir = persistence.resolve_directory()?;
            Ok(Arc::new(JsonFileBackend::new(dir)))
        }
        PersistenceKind::Sqlite => {
            let dir = persistence.resolve_directory()?;
            Ok(Arc::new(SqliteBackend::open(&dir.join(SQLITE_FILE))?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKind;
    use crate::config::load_config_from_str;
    use tempfile::TempDir;

    #[test]
    fn test_from_config_memory_backend_seeds() {
        let config = load_config_from_str(
            r#"{
                "version": "1.0",
                "grace_period_ms": 1500,
                "persistence": { "backend": "memory" },
                "seed": { "favorites": ["007"] }
            }"#,
        )
        .unwrap();

        let services = ActionServices::from_config(&config).unwrap();
        assert_eq!(services.grace_period, Duration::from_millis(1500));
        assert!(services
            .action_sets
            .contains(ActionKind::Favorite, &JobId::from(7u64)));
    }

    #[test]
    fn test_from_config_sqlite_backend_persists() {
        let dir = TempDir::new().unwrap();
        let json = format!(
            r#"{{ "version": "1.0", "persistence": {{ "backend": "sqlite", "path": {:?} }} }}"#,
            dir.path().display().to_string()
        );
        let config = load_config_from_str(&json).unwrap();

        {
            let services = ActionServices::from_config(&config).unwrap();
            services
                .action_sets
                .toggle(ActionKind::Hidden, &JobId::from(42u64));
        }

        let services = ActionServices::from_config(&config).unwrap();
        assert!(services
            .action_sets
            .contains(ActionKind::Hidden, &JobId::from("042")));
        assert!(dir.path().join(SQLITE_FILE).exists());
    }

    #[test]
    fn test_from_config_json_backend_persists_preferences() {
        let dir = TempDir::new().unwrap();
        let json = format!(
            r#"{{ "version": "1.0", "persistence": {{ "backend": "json", "path": {:?} }} }}"#,
            dir.path().display().to_string()
        );
        let config = load_config_from_str(&json).unwrap();

        ActionServices::from_config(&config)
            .unwrap()
            .preferences
            .set(ActionKind::Archive, true);

        let services = ActionServices::from_config(&config).unwrap();
        assert!(services.preferences.get(ActionKind::Archive));
    }
}
