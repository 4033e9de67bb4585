//! Cancellable delayed callback backing the grace window.

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Runs a callback once `deadline` passes unless cancelled first.
///
/// Dropping the timer cancels it.
pub struct GraceTimer {
    handle: Option<JoinHandle<()>>,
}

impl GraceTimer {
    pub fn arm<F>(runtime: &Handle, deadline: Instant, on_elapsed: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = runtime.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            on_elapsed();
        });

        Self {
            handle: Some(handle),
        }
    }

    /// Aborts the pending callback. A callback that already started is not
    /// interrupted, so callers must also guard the callback itself.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Releases the handle without aborting. Used from inside the callback.
    pub(crate) fn finish(mut self) {
        self.handle.take();
    }
}

impl Drop for GraceTimer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
