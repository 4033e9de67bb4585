//! Per-card action controller.
//!
//! Each displayed job card owns one [`ActionController`]. A request either
//! goes straight into the grace window (when the user opted out of
//! confirmation for that kind) or waits for the dialog first. The store is
//! only toggled when the grace timer elapses; undo and disposal cancel the
//! timer and leave the store untouched.
//!
//! ```text
//! Normal --request(k), skip--> Committing(k)
//! Normal --request(k)--------> ConfirmPending(k) --cancel--> Normal
//!                                   |
//!                                   +--confirm(skip)--> Committing(k)
//! Committing(k) --undo--> Normal            (no mutation)
//! Committing(k) --elapsed--> Normal         (store toggled)
//! ```
//!
//! Commit and cancellation both run under the controller's mutex and are
//! tagged with an epoch, so a timer that was cancelled can never commit even
//! if its task had already woken.

use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::Instant;
use uuid::Uuid;

use crate::actions::ActionKind;
use crate::error::ControllerError;
use crate::identifier::{CanonicalKey, JobId};
use crate::notify::ActionEvent;
use crate::services::ActionServices;

pub mod pending;
pub mod state;
pub mod timer;

pub use pending::PendingActions;
pub use state::{ActionState, CardView};
pub use timer::GraceTimer;

struct Inner {
    state: ActionState,
    timer: Option<GraceTimer>,
    /// Bumped whenever a timer is armed or cancelled.
    epoch: u64,
    disposed: bool,
}

struct Shared {
    id: JobId,
    key: CanonicalKey,
    instance: Uuid,
    services: ActionServices,
    inner: Mutex<Inner>,
    state_tx: watch::Sender<ActionState>,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        match self.inner.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Controller lock for job {} was poisoned, recovering", self.id);
                poisoned.into_inner()
            }
        }
    }

    fn set_state(&self, inner: &mut Inner, state: ActionState) {
        inner.state = state;
        self.state_tx.send_replace(state);
    }

    /// The state moves back to `Normal` under the lock; the store toggle
    /// and its save run after the lock is released.
    fn on_grace_elapsed(&self, epoch: u64) {
        let kind = {
            let mut inner = self.lock();
            if inner.disposed || inner.epoch != epoch {
                log::debug!("Stale grace timer for job {} ignored", self.id);
                return;
            }
            let ActionState::Committing { kind, .. } = inner.state else {
                return;
            };
            if let Some(timer) = inner.timer.take() {
                timer.finish();
            }
            self.set_state(&mut inner, ActionState::Normal);
            kind
        };

        let member = self.services.action_sets.toggle(kind, &self.id);
        self.services.pending.unregister(kind, &self.key);

        log::info!(
            "Committed {} for job {} (member: {}, controller {})",
            kind,
            self.id,
            member,
            self.instance
        );
        if let Some((mock_kind, n)) = self.id.mock_parts() {
            log::debug!("Job {} is mock fixture {} #{}", self.id, mock_kind, n);
        }
        self.services
            .notifier
            .send(ActionEvent::committed(kind, &self.id, member));
    }
}

/// Drives favorite/archive/hide requests for one job card.
///
/// Dropping the controller disposes it.
pub struct ActionController {
    shared: Arc<Shared>,
}

impl ActionController {
    pub fn new(id: impl Into<JobId>, services: ActionServices) -> Self {
        let id = id.into();
        let (state_tx, _) = watch::channel(ActionState::Normal);
        Self {
            shared: Arc::new(Shared {
                key: id.key(),
                id,
                instance: Uuid::new_v4(),
                services,
                inner: Mutex::new(Inner {
                    state: ActionState::Normal,
                    timer: None,
                    epoch: 0,
                    disposed: false,
                }),
                state_tx,
            }),
        }
    }

    pub fn job_id(&self) -> &JobId {
        &self.shared.id
    }

    pub fn state(&self) -> ActionState {
        self.shared.lock().state
    }

    /// Watches state transitions, starting from the current state.
    pub fn subscribe(&self) -> watch::Receiver<ActionState> {
        self.shared.state_tx.subscribe()
    }

    pub fn is_disposed(&self) -> bool {
        self.shared.lock().disposed
    }

    /// What the card should render.
    pub fn view(&self) -> CardView {
        match self.state() {
            ActionState::Normal => {
                let sets = &self.shared.services.action_sets;
                let id = &self.shared.id;
                CardView::Card {
                    favorite: sets.contains(ActionKind::Favorite, id),
                    archived: sets.contains(ActionKind::Archive, id),
                    hidden: sets.contains(ActionKind::Hidden, id),
                }
            }
            ActionState::ConfirmPending(kind) => CardView::Confirming(kind),
            ActionState::Committing { kind, deadline } => CardView::Placeholder { kind, deadline },
        }
    }

    /// Starts an action cycle for `kind`.
    ///
    /// Returns the state entered: `Committing` when confirmation is skipped
    /// for this kind, `ConfirmPending` otherwise.
    pub fn request(&self, kind: ActionKind) -> Result<ActionState, ControllerError> {
        let _span = tracing::debug_span!("action.request", kind = %kind, job = %self.shared.id)
            .entered();

        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(ControllerError::Disposed);
        }
        if let Some(active) = inner.state.kind() {
            return Err(ControllerError::Busy(active));
        }

        if self.shared.services.preferences.get(kind) {
            let runtime = runtime()?;
            Ok(self.begin_commit(&mut inner, &runtime, kind))
        } else {
            let state = ActionState::ConfirmPending(kind);
            self.shared.set_state(&mut inner, state);
            log::debug!("Awaiting confirmation of {} for job {}", kind, self.shared.id);
            Ok(state)
        }
    }

    /// Accepts the open confirmation. `skip_future` persists the
    /// "don't ask again" choice before the grace window starts.
    pub fn confirm(&self, skip_future: bool) -> Result<ActionState, ControllerError> {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(ControllerError::Disposed);
        }
        let ActionState::ConfirmPending(kind) = inner.state else {
            return Err(ControllerError::InvalidTransition {
                operation: "confirm",
                state: inner.state.name(),
            });
        };

        let runtime = runtime()?;
        if skip_future {
            self.shared.services.preferences.set(kind, true);
        }
        Ok(self.begin_commit(&mut inner, &runtime, kind))
    }

    /// Dismisses the open confirmation without changing anything.
    pub fn cancel(&self) -> Result<ActionState, ControllerError> {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(ControllerError::Disposed);
        }
        let ActionState::ConfirmPending(kind) = inner.state else {
            return Err(ControllerError::InvalidTransition {
                operation: "cancel",
                state: inner.state.name(),
            });
        };

        self.shared.set_state(&mut inner, ActionState::Normal);
        log::debug!("Cancelled {} for job {}", kind, self.shared.id);
        Ok(ActionState::Normal)
    }

    /// Cancels a commit inside its grace window. The store is not touched.
    pub fn undo(&self) -> Result<ActionState, ControllerError> {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return Err(ControllerError::Disposed);
        }
        let ActionState::Committing { kind, .. } = inner.state else {
            return Err(ControllerError::InvalidTransition {
                operation: "undo",
                state: inner.state.name(),
            });
        };

        inner.epoch += 1;
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        let services = &self.shared.services;
        services.pending.unregister(kind, &self.shared.key);
        self.shared.set_state(&mut inner, ActionState::Normal);

        log::info!("Undid {} for job {}", kind, self.shared.id);
        let member = services.action_sets.contains(kind, &self.shared.id);
        services
            .notifier
            .send(ActionEvent::undone(kind, &self.shared.id, member));
        Ok(ActionState::Normal)
    }

    /// Runs a whole cycle, presenting the confirmation through the
    /// configured [`Confirmer`](crate::confirm::Confirmer) when needed.
    pub async fn request_with_confirmation(
        &self,
        kind: ActionKind,
    ) -> Result<ActionState, ControllerError> {
        let state = self.request(kind)?;
        let ActionState::ConfirmPending(kind) = state else {
            return Ok(state);
        };

        let confirmer = Arc::clone(&self.shared.services.confirmer);
        let outcome = confirmer.present_confirmation(kind).await;
        if outcome.confirmed {
            self.confirm(outcome.skip_future)
        } else {
            self.cancel()
        }
    }

    /// Tears the controller down. Any armed timer is cancelled and nothing
    /// is committed. Idempotent.
    pub fn dispose(&self) {
        let mut inner = self.shared.lock();
        if inner.disposed {
            return;
        }
        inner.disposed = true;
        inner.epoch += 1;
        if let Some(timer) = inner.timer.take() {
            timer.cancel();
        }
        if let ActionState::Committing { kind, .. } = inner.state {
            self.shared.services.pending.unregister(kind, &self.shared.key);
            log::debug!(
                "Discarded pending {} for job {} on dispose",
                kind,
                self.shared.id
            );
        }
        self.shared.set_state(&mut inner, ActionState::Normal);
    }

    fn begin_commit(&self, inner: &mut Inner, runtime: &Handle, kind: ActionKind) -> ActionState {
        let services = &self.shared.services;
        let deadline = Instant::now() + services.grace_period;

        inner.epoch += 1;
        let epoch = inner.epoch;
        let weak: Weak<Shared> = Arc::downgrade(&self.shared);
        inner.timer = Some(GraceTimer::arm(runtime, deadline, move || {
            if let Some(shared) = weak.upgrade() {
                shared.on_grace_elapsed(epoch);
            }
        }));

        services.pending.register(kind, self.shared.key.clone());
        let state = ActionState::Committing { kind, deadline };
        self.shared.set_state(inner, state);

        log::debug!(
            "Committing {} for job {} in {:?}",
            kind,
            self.shared.id,
            services.grace_period
        );
        state
    }
}

impl Drop for ActionController {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn runtime() -> Result<Handle, ControllerError> {
    Handle::try_current().map_err(|_| ControllerError::NoRuntime)
}
