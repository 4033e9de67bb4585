//! Confirmation dialog capability.
//!
//! The controller only awaits an outcome; what the dialog looks like is up to
//! the implementor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::actions::ActionKind;

/// Result of presenting a confirmation dialog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationOutcome {
    pub confirmed: bool,
    /// The user ticked "don't ask again".
    pub skip_future: bool,
}

impl ConfirmationOutcome {
    pub fn accepted() -> Self {
        Self {
            confirmed: true,
            skip_future: false,
        }
    }

    pub fn accepted_and_skip() -> Self {
        Self {
            confirmed: true,
            skip_future: true,
        }
    }

    pub fn cancelled() -> Self {
        Self::default()
    }
}

#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn present_confirmation(&self, kind: ActionKind) -> ConfirmationOutcome;
}

/// Answers every prompt with a fixed outcome. Useful for headless hosts.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub ConfirmationOutcome);

impl Default for AutoConfirm {
    fn default() -> Self {
        Self(ConfirmationOutcome::accepted())
    }
}

#[async_trait]
impl Confirmer for AutoConfirm {
    async fn present_confirmation(&self, _kind: ActionKind) -> ConfirmationOutcome {
        self.0
    }
}
