use tokio::time::Instant;

use crate::actions::ActionKind;

/// Where a single job card is in its action cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionState {
    /// Showing authoritative membership; accepts new requests.
    Normal,
    /// Waiting on the confirmation dialog.
    ConfirmPending(ActionKind),
    /// Accepted; the store is toggled when `deadline` passes unless undone.
    Committing { kind: ActionKind, deadline: Instant },
}

impl ActionState {
    pub fn name(&self) -> &'static str {
        match self {
            ActionState::Normal => "normal",
            ActionState::ConfirmPending(_) => "confirm_pending",
            ActionState::Committing { .. } => "committing",
        }
    }

    pub fn kind(&self) -> Option<ActionKind> {
        match self {
            ActionState::Normal => None,
            ActionState::ConfirmPending(kind) | ActionState::Committing { kind, .. } => Some(*kind),
        }
    }

    pub fn is_committing(&self) -> bool {
        matches!(self, ActionState::Committing { .. })
    }
}

impl std::fmt::Display for ActionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionState::Normal => write!(f, "normal"),
            ActionState::ConfirmPending(kind) => write!(f, "confirm_pending({})", kind),
            ActionState::Committing { kind, .. } => write!(f, "committing({})", kind),
        }
    }
}

/// What the card should render right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardView {
    /// Regular card reflecting stored membership.
    Card {
        favorite: bool,
        archived: bool,
        hidden: bool,
    },
    /// Confirmation dialog is open over the card.
    Confirming(ActionKind),
    /// Kind-specific transient row with an Undo affordance.
    Placeholder { kind: ActionKind, deadline: Instant },
}
