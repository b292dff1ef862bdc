//! Debounced writes on top of WeekStore
//!
//! Interactive editing produces a burst of state changes per keystroke.
//! The saver keeps at most one pending snapshot and only makes it durable
//! once a quiet period has elapsed since the last schedule. Scheduling
//! again supersedes the pending snapshot, it never queues behind it.

use eyre::Result;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::store::{WeekId, WeekStore};

/// A snapshot waiting out its quiet period
struct Pending<T> {
    week_id: WeekId,
    record: T,
    due: Instant,
}

/// Debounced writer over a [`WeekStore`]
///
/// Single-threaded by design: the owner drives it by calling [`poll`]
/// from its event loop (the planner does so on every tick). The pending
/// snapshot carries the week id it was taken under, so a write that fires
/// after the owner has navigated to another week still lands under the
/// key it belongs to.
///
/// [`poll`]: DebouncedSaver::poll
pub struct DebouncedSaver<T> {
    store: WeekStore<T>,
    delay: Duration,
    pending: Option<Pending<T>>,
}

impl<T: Serialize + DeserializeOwned> DebouncedSaver<T> {
    /// Create a saver with the given quiet period
    pub fn new(store: WeekStore<T>, delay: Duration) -> Self {
        Self {
            store,
            delay,
            pending: None,
        }
    }

    /// Schedule a write, superseding any pending one
    ///
    /// The previous snapshot (same week or not) is discarded; only the
    /// last-scheduled value ever reaches disk.
    pub fn schedule(&mut self, week_id: impl Into<WeekId>, record: T) {
        let week_id = week_id.into();
        debug!(%week_id, "Scheduled debounced save");
        self.pending = Some(Pending {
            week_id,
            record,
            due: Instant::now() + self.delay,
        });
    }

    /// Write the pending snapshot if its quiet period has elapsed
    ///
    /// Returns the week id that was written, if any.
    pub fn poll(&mut self) -> Result<Option<WeekId>> {
        let due = self.pending.as_ref().is_some_and(|p| Instant::now() >= p.due);
        if !due {
            return Ok(None);
        }
        self.write_pending()
    }

    /// Write the pending snapshot immediately, ignoring the quiet period
    ///
    /// Used before week navigation and on shutdown so edits cannot be lost.
    pub fn flush(&mut self) -> Result<Option<WeekId>> {
        self.write_pending()
    }

    /// Drop the pending snapshot without writing it
    pub fn cancel(&mut self) -> Option<WeekId> {
        self.pending.take().map(|p| {
            debug!(week_id = %p.week_id, "Cancelled pending save");
            p.week_id
        })
    }

    /// Whether a snapshot is waiting to be written
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The store this saver writes through
    pub fn store(&self) -> &WeekStore<T> {
        &self.store
    }

    fn write_pending(&mut self) -> Result<Option<WeekId>> {
        match self.pending.take() {
            Some(p) => {
                self.store.save(&p.week_id, &p.record)?;
                Ok(Some(p.week_id))
            }
            None => Ok(None),
        }
    }
}
