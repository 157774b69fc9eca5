//! `WakeQueue` — sparse per-tick worker activation queue.
//!
//! Workers spend most ticks waiting out a hop delay.  Instead of polling every
//! worker every tick, a worker registers the tick at which it next needs to
//! step and the driver drains only the workers due now.
//!
//! A worker has at most one pending wake-up: scheduling it again moves the
//! existing entry rather than adding a second one.

use std::collections::BTreeMap;

use relay_core::{Tick, WorkerId};

#[derive(Default)]
pub struct WakeQueue {
    inner:   BTreeMap<Tick, Vec<WorkerId>>,
    pending: BTreeMap<WorkerId, Tick>,
}

impl WakeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `worker` to wake at `tick`, replacing any earlier entry.
    pub fn push(&mut self, tick: Tick, worker: WorkerId) {
        if let Some(old) = self.pending.insert(worker, tick) {
            self.unlink(old, worker);
        }
        self.inner.entry(tick).or_default().push(worker);
    }

    /// Drop `worker`'s pending wake-up, if any.
    pub fn cancel(&mut self, worker: WorkerId) -> Option<Tick> {
        let tick = self.pending.remove(&worker)?;
        self.unlink(tick, worker);
        Some(tick)
    }

    /// Remove and return every worker scheduled for exactly `tick`, in
    /// ascending id order.
    ///
    /// Returns `None` if nothing is queued for that tick.
    pub fn drain_tick(&mut self, tick: Tick) -> Option<Vec<WorkerId>> {
        let mut workers = self.inner.remove(&tick)?;
        for w in &workers {
            self.pending.remove(w);
        }
        workers.sort_unstable();
        Some(workers)
    }

    /// When `worker` is next due, if it is queued.
    pub fn scheduled(&self, worker: WorkerId) -> Option<Tick> {
        self.pending.get(&worker).copied()
    }

    /// The earliest tick with at least one queued worker.
    pub fn next_tick(&self) -> Option<Tick> {
        self.inner.keys().next().copied()
    }

    /// Number of queued workers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Number of distinct future ticks with at least one queued worker.
    pub fn tick_count(&self) -> usize {
        self.inner.len()
    }

    fn unlink(&mut self, tick: Tick, worker: WorkerId) {
        if let Some(list) = self.inner.get_mut(&tick) {
            list.retain(|&w| w != worker);
            if list.is_empty() {
                self.inner.remove(&tick);
            }
        }
    }
}
