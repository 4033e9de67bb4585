//! Commit/undo notifications for toast presentation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::actions::ActionKind;
use crate::identifier::JobId;

/// How a grace-window cycle ended.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActionOutcome {
    Committed,
    Undone,
}

impl std::fmt::Display for ActionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionOutcome::Committed => write!(f, "committed"),
            ActionOutcome::Undone => write!(f, "undone"),
        }
    }
}

/// Emitted on every commit and every explicit undo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionEvent {
    pub kind: ActionKind,
    pub id: JobId,
    pub outcome: ActionOutcome,
    /// Membership after the event. Unchanged for `undone`.
    pub member: bool,
    pub timestamp: DateTime<Utc>,
}

impl ActionEvent {
    pub fn committed(kind: ActionKind, id: &JobId, member: bool) -> Self {
        Self {
            kind,
            id: id.clone(),
            outcome: ActionOutcome::Committed,
            member,
            timestamp: Utc::now(),
        }
    }

    pub fn undone(kind: ActionKind, id: &JobId, member: bool) -> Self {
        Self {
            kind,
            id: id.clone(),
            outcome: ActionOutcome::Undone,
            member,
            timestamp: Utc::now(),
        }
    }
}

/// Fans action events out to any number of subscribers.
#[derive(Clone)]
pub struct ActionNotifier {
    sender: Arc<broadcast::Sender<ActionEvent>>,
}

impl ActionNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn send(&self, event: ActionEvent) {
        // No active receivers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ActionEvent> {
        self.sender.subscribe()
    }
}

impl Default for ActionNotifier {
    fn default() -> Self {
        Self::new(100)
    }
}
