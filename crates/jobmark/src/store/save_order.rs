//! Ordering of best-effort saves.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crate::error::PersistenceError;

/// Keeps saves in mutation order.
///
/// A ticket is taken while the write guard of the mutated value is still
/// held, so ticket order is mutation order. Saves then run one at a time,
/// and a ticket older than the last written one is dropped.
#[derive(Debug, Default)]
pub(crate) struct SaveOrder {
    issued: AtomicU64,
    written: Mutex<u64>,
}

impl SaveOrder {
    pub(crate) fn ticket(&self) -> u64 {
        self.issued.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Runs `save` for `ticket` unless a newer ticket was already written.
    ///
    /// Returns `Ok(false)` when the save was skipped as stale. A failed save
    /// does not advance the written ticket.
    pub(crate) fn save<F>(&self, ticket: u64, save: F) -> Result<bool, PersistenceError>
    where
        F: FnOnce() -> Result<(), PersistenceError>,
    {
        let mut written = match self.written.lock() {
            Ok(g) => g,
            Err(poisoned) => {
                log::warn!("Save order lock was poisoned, recovering");
                poisoned.into_inner()
            }
        };
        if *written > ticket {
            return Ok(false);
        }
        save()?;
        *written = ticket;
        Ok(true)
    }
}
