//! Favorite, archive and hide state for job postings.
//!
//! Identifiers are normalized once ([`identifier`]), membership lives in
//! three persisted sets ([`store`]), and every job card drives its actions
//! through an [`ActionController`] that confirms, waits out a grace window
//! and only then commits.

pub mod actions;
pub mod config;
pub mod confirm;
pub mod controller;
pub mod error;
pub mod identifier;
pub mod listing;
pub mod logging;
pub mod notify;
pub mod persistence;
pub mod services;
pub mod store;

pub use actions::{ActionKind, ActionSetSnapshot, PreferenceSnapshot};
pub use config::{load_config, load_config_from_str, Config};
pub use confirm::{AutoConfirm, ConfirmationOutcome, Confirmer};
pub use controller::{ActionController, ActionState, CardView, PendingActions};
pub use error::{ConfigError, ControllerError, JobmarkError, PersistenceError, Result};
pub use identifier::{equal, normalize, CanonicalKey, JobId};
pub use listing::{counts, visible, visible_with_pending, JobPosting, ListedJob, Listable, ListingScope};
pub use notify::{ActionEvent, ActionNotifier, ActionOutcome};
pub use persistence::{JsonFileBackend, MemoryBackend, PersistenceBackend, SqliteBackend};
pub use services::ActionServices;
pub use store::{ActionSetStore, PreferenceStore};
