//! Last-known validity of every step.
//!
//! The tracker snapshots each step's validity on [`rebuild`] and keeps the
//! snapshot current by subscribing to the step controls' status streams.
//! Those subscriptions belong to one step collection only: every rebuild
//! releases the previous set before acquiring the next, and dropping the
//! tracker releases whatever is left. A generation counter additionally
//! guards against a notification that was already in flight while the
//! collection was being replaced.
//!
//! [`rebuild`]: ValidationTracker::rebuild

use std::collections::HashMap;
use std::ops::Range;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use horizon_stepper_core::logging::targets;
use horizon_stepper_core::{PerfSpan, Signal, SubscriptionGroup};

use super::step::Step;

/// A recorded validity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidityChange {
    pub index: usize,
    pub valid: bool,
}

#[derive(Debug, Default)]
struct TrackerState {
    generation: AtomicU64,
    entries: RwLock<HashMap<usize, bool>>,
}

impl TrackerState {
    /// Store one entry, returning true if the stored value changed.
    fn record(&self, index: usize, valid: bool) -> bool {
        self.entries.write().insert(index, valid) != Some(valid)
    }
}

/// Map from step index to last-known validity.
///
/// Only steps with a [`StepControl`](super::step::StepControl) get an entry.
/// A missing entry means "always valid".
#[derive(Debug)]
pub struct ValidationTracker {
    state: Arc<TrackerState>,
    subscriptions: SubscriptionGroup,
    validity_changed: Arc<Signal<ValidityChange>>,
}

impl Default for ValidationTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidationTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            state: Arc::new(TrackerState::default()),
            subscriptions: SubscriptionGroup::new(),
            validity_changed: Arc::new(Signal::new()),
        }
    }

    /// Emitted whenever a stored entry changes value.
    pub fn validity_changes(&self) -> &Arc<Signal<ValidityChange>> {
        &self.validity_changed
    }

    /// Replace the whole map with a snapshot of `steps` and re-subscribe.
    pub fn rebuild(&mut self, steps: &[Step]) {
        let _perf = PerfSpan::new("validation_rebuild");

        let released = self.subscriptions.release_all();
        let generation = self.state.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let controls: Vec<_> = steps
            .iter()
            .enumerate()
            .filter_map(|(index, step)| step.control().map(|control| (index, control)))
            .collect();
        *self.state.entries.write() = controls
            .iter()
            .map(|(index, control)| (*index, control.is_valid()))
            .collect();

        for (index, control) in controls {
            let state = Arc::clone(&self.state);
            let changed = Arc::clone(&self.validity_changed);
            self.subscriptions
                .push(Signal::subscribe(control.status_changes(), move |&valid| {
                    if state.generation.load(Ordering::SeqCst) != generation {
                        return;
                    }
                    if state.record(index, valid) {
                        tracing::trace!(target: targets::VALIDATION, index, valid, "step validity changed");
                        changed.emit(ValidityChange { index, valid });
                    }
                }));
        }

        tracing::debug!(
            target: targets::VALIDATION,
            steps = steps.len(),
            tracked = self.subscriptions.len(),
            released,
            generation,
            "rebuilt validation map"
        );
    }

    /// Set one entry directly.
    pub fn update(&self, index: usize, valid: bool) {
        if self.state.record(index, valid) {
            tracing::trace!(target: targets::VALIDATION, index, valid, "step validity updated");
            self.validity_changed.emit(ValidityChange { index, valid });
        }
    }

    /// Last-known validity, or `None` when the step has no entry.
    pub fn is_valid(&self, index: usize) -> Option<bool> {
        self.state.entries.read().get(&index).copied()
    }

    /// True when no entry is explicitly invalid.
    pub fn all_valid(&self) -> bool {
        self.state.entries.read().values().all(|&valid| valid)
    }

    /// True when no index in `range` is explicitly invalid.
    ///
    /// Walks the stored entries, so the cost does not depend on the width of
    /// `range`.
    pub fn range_valid(&self, range: Range<usize>) -> bool {
        self.state
            .entries
            .read()
            .iter()
            .all(|(index, &valid)| valid || !range.contains(index))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.state.entries.read().len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.state.entries.read().is_empty()
    }

    /// Number of live status subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    /// Drop every subscription and entry.
    pub fn release(&mut self) {
        let released = self.subscriptions.release_all();
        self.state.generation.fetch_add(1, Ordering::SeqCst);
        self.state.entries.write().clear();
        tracing::debug!(target: targets::VALIDATION, released, "released validation subscriptions");
    }
}
