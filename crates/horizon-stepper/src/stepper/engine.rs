//! The stepper state machine.
//!
//! [`StepperEngine`] owns the selected step index and decides whether a
//! requested move is allowed. It composes the other stepper parts:
//!
//! - [`ValidationTracker`] for linear-mode gating
//! - [`WindowPaginator`] for the header's step markers
//! - [`SwipeClassifier`] for touch navigation
//!
//! Refused moves never fail loudly. The call returns `false`, the selection
//! stays where it was, and a [`NavigationAttempt`] describing the refusal is
//! emitted on [`navigation_attempt`](StepperEngine::navigation_attempt).
//! Successful moves are announced through the selection observable instead.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_stepper::prelude::*;
//!
//! let details = Arc::new(StepControl::new(false));
//! let mut engine = StepperEngine::new(StepperConfig::default().with_linear(true));
//! engine.set_steps(vec![
//!     Step::new().with_title("Details").with_control(details.clone()),
//!     Step::new().with_title("Review"),
//! ]);
//!
//! assert!(!engine.next());
//! details.set_valid(true);
//! assert!(engine.next());
//! assert_eq!(engine.selected_index(), Some(1));
//! ```

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use horizon_stepper_core::logging::targets;
use horizon_stepper_core::{Change, Observable, PerfSpan, Signal};

use super::gesture::{GestureConfig, SwipeClassifier, SwipeIntent, TouchPoint, TouchTarget};
use super::paginator::{NavMarker, WindowPaginator};
use super::step::{Step, StepStatus, StepSummary};
use super::validation::{ValidationTracker, ValidityChange};
use crate::config::StepperConfig;

// ============================================================================
// Navigation Reporting
// ============================================================================

/// Why a navigation request was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockReason {
    /// A step that must be passed is invalid.
    Validation,
    /// Reserved for refusals specific to linear mode; not produced today.
    Linear,
    /// The target lies outside the step collection.
    Boundary,
}

/// A refused navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationAttempt {
    /// Selected index when the request was made.
    pub from: usize,
    /// Requested index; `-1` for "previous" from the first step.
    pub to: isize,
    /// Always false for emitted attempts.
    pub allowed: bool,
    /// Set whenever `allowed` is false.
    pub reason: Option<BlockReason>,
}

/// Result of feeding a touch-end into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwipeOutcome {
    /// How the gesture was classified.
    pub intent: SwipeIntent,
    /// Whether the selection moved.
    pub navigated: bool,
}

// ============================================================================
// StepperEngine
// ============================================================================

/// Navigation and state engine of a multi-step form.
///
/// # Signals
///
/// - `navigation_attempt`: a move was refused
/// - `overview_requested`: a gap marker was activated
/// - `window_size_changed`: the marker window was resized
/// - [`selection_changed`](Self::selection_changed): the selected index moved
/// - [`steps_visible_changed`](Self::steps_visible_changed): the header strip was toggled
pub struct StepperEngine {
    config: StepperConfig,
    steps: Vec<Step>,
    selected: Observable<usize>,
    steps_visible: Observable<bool>,
    tracker: ValidationTracker,
    paginator: WindowPaginator,
    classifier: SwipeClassifier,

    /// Emitted for every refused navigation request.
    pub navigation_attempt: Signal<NavigationAttempt>,
    /// Emitted when the user asks for the all-steps overview.
    pub overview_requested: Signal<()>,
    /// Emitted with the new window size when the strip width changes it.
    pub window_size_changed: Signal<usize>,
}

impl StepperEngine {
    /// Create an engine with no steps.
    pub fn new(config: StepperConfig) -> Self {
        let paginator = WindowPaginator::new(
            config.pagination.item_width,
            config.pagination.min_window_size,
        );
        let classifier = SwipeClassifier::new(GestureConfig::from(&config.swipe));
        Self {
            steps: Vec::new(),
            selected: Observable::new(0),
            steps_visible: Observable::new(config.steps_visible),
            tracker: ValidationTracker::new(),
            paginator,
            classifier,
            navigation_attempt: Signal::new(),
            overview_requested: Signal::new(),
            window_size_changed: Signal::new(),
            config,
        }
    }

    /// Create an engine and register `steps` right away.
    pub fn with_steps(config: StepperConfig, steps: Vec<Step>) -> Self {
        let mut engine = Self::new(config);
        engine.set_steps(steps);
        engine
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &StepperConfig {
        &self.config
    }

    /// Whether forward moves are gated on validity.
    pub fn is_linear(&self) -> bool {
        self.config.linear
    }

    // =========================================================================
    // Step Collection
    // =========================================================================

    /// Register a new step collection.
    ///
    /// Subscriptions to the previous collection are released before the new
    /// ones are made. The selection is clamped into the new range.
    pub fn set_steps(&mut self, steps: Vec<Step>) {
        let _perf = PerfSpan::new("set_steps");

        self.tracker.rebuild(&steps);
        self.steps = steps;

        // An empty collection has no selection to announce.
        if self.steps.is_empty() {
            self.selected.set_silent(0);
        } else if self.selected.get() >= self.steps.len() {
            self.selected.set(self.steps.len() - 1);
        }
        tracing::debug!(
            target: targets::ENGINE,
            total = self.steps.len(),
            selected = self.selected.get(),
            "registered steps"
        );
    }

    /// Registered steps in order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Selected index, or `None` when there are no steps.
    pub fn selected_index(&self) -> Option<usize> {
        (!self.steps.is_empty()).then(|| self.selected.get())
    }

    /// Externally requested selection change; gated like [`navigate_to`](Self::navigate_to).
    pub fn set_selected_index(&self, index: usize) -> bool {
        self.navigate_to(index)
    }

    /// Emitted after every committed selection change.
    pub fn selection_changed(&self) -> &Signal<Change<usize>> {
        &self.selected.changed
    }

    /// 1-based number of the selected step, `0` when empty.
    pub fn current_step(&self) -> usize {
        self.selected_index().map_or(0, |index| index + 1)
    }

    pub fn is_first(&self) -> bool {
        self.selected_index() == Some(0)
    }

    pub fn is_last(&self) -> bool {
        self.selected_index()
            .is_some_and(|index| index + 1 == self.steps.len())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Whether moving from the selection to `target` passes the gate.
    ///
    /// Targets outside the collection never pass. Backward moves and
    /// non-linear engines are otherwise ungated. Forward moves in linear mode
    /// require every step from the selection up to (but not including)
    /// `target` to be valid; steps without an entry count as valid.
    pub fn can_navigate_to_step(&self, target: usize) -> bool {
        if target >= self.steps.len() {
            return false;
        }
        let selected = self.selected.get();
        if target < selected || !self.config.linear {
            return true;
        }
        self.tracker.range_valid(selected..target)
    }

    pub fn can_previous(&self) -> bool {
        self.selected_index().is_some_and(|index| index > 0)
    }

    pub fn can_next(&self) -> bool {
        self.can_navigate_to_step(self.selected.get() + 1)
    }

    /// Advance one step.
    pub fn next(&self) -> bool {
        let target = self.selected.get() + 1;
        if target >= self.steps.len() {
            return self.reject(target as isize, BlockReason::Boundary);
        }
        if !self.can_navigate_to_step(target) {
            return self.reject(target as isize, BlockReason::Validation);
        }
        self.commit(target)
    }

    /// Go back one step. Never gated on validity.
    pub fn previous(&self) -> bool {
        let selected = self.selected.get();
        if self.steps.is_empty() || selected == 0 {
            return self.reject(selected as isize - 1, BlockReason::Boundary);
        }
        self.commit(selected - 1)
    }

    /// Jump to `index`.
    pub fn navigate_to(&self, index: usize) -> bool {
        if index >= self.steps.len() {
            return self.reject(index as isize, BlockReason::Boundary);
        }
        if !self.can_navigate_to_step(index) {
            return self.reject(index as isize, BlockReason::Validation);
        }
        self.commit(index)
    }

    /// Select the first step and ask every step to clear itself.
    pub fn reset(&mut self) {
        self.classifier.cancel();
        self.selected.set(0);
        for control in self.steps.iter().filter_map(Step::control) {
            control.reset();
        }
        tracing::debug!(target: targets::ENGINE, total = self.steps.len(), "stepper reset");
    }

    fn commit(&self, index: usize) -> bool {
        let from = self.selected.get();
        if self.selected.set(index) {
            tracing::debug!(target: targets::ENGINE, from, to = index, "navigated");
        }
        true
    }

    fn reject(&self, to: isize, reason: BlockReason) -> bool {
        let from = self.selected.get();
        tracing::debug!(target: targets::ENGINE, from, to, ?reason, "navigation blocked");

        if reason == BlockReason::Validation
            && let Some(control) = self.steps.get(from).and_then(Step::control)
        {
            control.mark_all_touched();
        }
        self.navigation_attempt.emit(NavigationAttempt {
            from,
            to,
            allowed: false,
            reason: Some(reason),
        });
        false
    }

    // =========================================================================
    // Validation
    // =========================================================================

    /// Re-read one step's validity; invalid steps are asked to show errors.
    ///
    /// Returns false for indices outside the collection.
    pub fn validate_step(&self, index: usize) -> bool {
        let Some(step) = self.steps.get(index) else {
            return false;
        };
        let valid = step.is_valid();
        if let Some(control) = step.control() {
            self.tracker.update(index, valid);
            if !valid {
                control.mark_all_touched();
            }
        }
        valid
    }

    /// [`validate_step`](Self::validate_step) for every step.
    pub fn validate_all(&self) -> bool {
        (0..self.steps.len()).fold(true, |all, index| self.validate_step(index) && all)
    }

    /// Last-known validity of `index`; `None` when the step has no control.
    pub fn step_validity(&self, index: usize) -> Option<bool> {
        self.tracker.is_valid(index)
    }

    /// True when every tracked step is valid.
    pub fn all_valid(&self) -> bool {
        self.tracker.all_valid()
    }

    /// Emitted when a tracked step's validity changes.
    pub fn validity_changes(&self) -> &Arc<Signal<ValidityChange>> {
        self.tracker.validity_changes()
    }

    // =========================================================================
    // Header and Overview
    // =========================================================================

    /// `round(100 * (selected + 1) / total)`, or `0` with no steps.
    pub fn progress_percentage(&self) -> u32 {
        let total = self.steps.len();
        if total == 0 {
            return 0;
        }
        let done = (self.selected.get() + 1) as f64;
        (done * 100.0 / total as f64).round() as u32
    }

    /// Markers to render in the header strip.
    pub fn visible_markers(&self) -> Vec<NavMarker> {
        self.paginator.markers(self.steps.len(), self.selected.get())
    }

    /// Visible markers paired with their status; gaps have none.
    pub fn marker_statuses(&self) -> Vec<(NavMarker, Option<StepStatus>)> {
        let selected = self.selected.get();
        self.visible_markers()
            .into_iter()
            .map(|marker| {
                let status = marker
                    .step_index()
                    .map(|index| StepStatus::of(index, selected));
                (marker, status)
            })
            .collect()
    }

    pub fn step_status(&self, index: usize) -> StepStatus {
        StepStatus::of(index, self.selected.get())
    }

    /// Marker label: a check mark for completed steps, else the 1-based number.
    pub fn step_label(&self, index: usize) -> String {
        match self.step_status(index) {
            StepStatus::Completed => "✓".to_string(),
            _ => (index + 1).to_string(),
        }
    }

    /// Overview rows for every step.
    pub fn all_steps_summary(&self) -> Vec<StepSummary> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| step.summary(index))
            .collect()
    }

    pub fn steps_visible(&self) -> bool {
        self.steps_visible.get()
    }

    pub fn set_steps_visible(&self, visible: bool) {
        self.steps_visible.set(visible);
    }

    pub fn toggle_steps_visible(&self) {
        self.steps_visible.set(!self.steps_visible.get());
    }

    pub fn steps_visible_changed(&self) -> &Signal<Change<bool>> {
        &self.steps_visible.changed
    }

    /// A gap marker was activated.
    pub fn gap_activated(&self) {
        self.overview_requested.emit(());
    }

    /// A step marker or overview row was clicked.
    pub fn step_clicked(&self, index: usize) -> bool {
        self.navigate_to(index)
    }

    // =========================================================================
    // Layout
    // =========================================================================

    /// Current marker window size.
    pub fn window_size(&self) -> usize {
        self.paginator.window_size()
    }

    /// Feed a new strip width measured by the host.
    pub fn set_available_width(&mut self, width: f32) {
        if let Some(size) = self.paginator.set_available_width(width) {
            self.window_size_changed.emit(size);
        }
    }

    // =========================================================================
    // Touch Input
    // =========================================================================

    pub fn touch_start(&mut self, position: TouchPoint, timestamp: Duration, target: TouchTarget) {
        self.classifier.on_start(position, timestamp, target);
    }

    /// Classify the finished touch and navigate accordingly.
    pub fn touch_end(&mut self, position: TouchPoint, timestamp: Duration) -> SwipeOutcome {
        let intent = self.classifier.on_end(position, timestamp);
        let navigated = match intent {
            SwipeIntent::Next => self.next(),
            SwipeIntent::Previous => self.previous(),
            SwipeIntent::None => false,
        };
        SwipeOutcome { intent, navigated }
    }
}

impl Default for StepperEngine {
    fn default() -> Self {
        Self::new(StepperConfig::default())
    }
}

impl Drop for StepperEngine {
    fn drop(&mut self) {
        self.tracker.release();
    }
}

impl std::fmt::Debug for StepperEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepperEngine")
            .field("total", &self.steps.len())
            .field("selected", &self.selected_index())
            .field("linear", &self.config.linear)
            .field("window_size", &self.paginator.window_size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stepper::step::StepControl;
    use parking_lot::Mutex;

    fn engine_with(total: usize, linear: bool) -> (StepperEngine, Vec<Arc<StepControl>>) {
        let controls: Vec<_> = (0..total).map(|_| Arc::new(StepControl::new(true))).collect();
        let steps = controls
            .iter()
            .map(|control| Step::new().with_control(control.clone()))
            .collect();
        let engine =
            StepperEngine::with_steps(StepperConfig::default().with_linear(linear), steps);
        (engine, controls)
    }

    fn capture_attempts(engine: &StepperEngine) -> Arc<Mutex<Vec<NavigationAttempt>>> {
        let attempts = Arc::new(Mutex::new(Vec::new()));
        let attempts_clone = attempts.clone();
        engine
            .navigation_attempt
            .connect(move |attempt| attempts_clone.lock().push(*attempt));
        attempts
    }

    #[test]
    fn test_empty_engine() {
        let engine = StepperEngine::default();
        assert_eq!(engine.selected_index(), None);
        assert_eq!(engine.current_step(), 0);
        assert_eq!(engine.progress_percentage(), 0);
        assert!(!engine.can_next());
        assert!(!engine.can_previous());
        assert!(!engine.is_first());
        assert!(!engine.is_last());
        assert!(engine.visible_markers().is_empty());
        assert!(!engine.next());
        assert!(!engine.previous());
        assert!(!engine.navigate_to(0));
    }

    #[test]
    fn test_next_and_previous() {
        let (engine, _controls) = engine_with(3, false);
        assert_eq!(engine.selected_index(), Some(0));
        assert!(engine.is_first());

        assert!(engine.next());
        assert!(engine.next());
        assert_eq!(engine.selected_index(), Some(2));
        assert!(engine.is_last());

        assert!(engine.previous());
        assert_eq!(engine.selected_index(), Some(1));
    }

    #[test]
    fn test_next_at_last_step_is_boundary() {
        let (engine, _controls) = engine_with(3, false);
        engine.navigate_to(2);
        let attempts = capture_attempts(&engine);

        assert!(!engine.next());
        assert_eq!(engine.selected_index(), Some(2));
        assert_eq!(
            *attempts.lock(),
            vec![NavigationAttempt {
                from: 2,
                to: 3,
                allowed: false,
                reason: Some(BlockReason::Boundary),
            }]
        );
    }

    #[test]
    fn test_previous_at_first_step_is_boundary() {
        let (engine, _controls) = engine_with(3, true);
        let attempts = capture_attempts(&engine);

        assert!(!engine.previous());
        assert_eq!(engine.selected_index(), Some(0));

        let attempts = attempts.lock();
        assert_eq!(attempts.len(), 1);
        assert_eq!(attempts[0].to, -1);
        assert_eq!(attempts[0].reason, Some(BlockReason::Boundary));
    }

    #[test]
    fn test_navigate_out_of_range_is_boundary() {
        let (engine, _controls) = engine_with(3, false);
        let attempts = capture_attempts(&engine);

        assert!(!engine.navigate_to(3));
        assert_eq!(attempts.lock()[0].reason, Some(BlockReason::Boundary));
    }

    #[test]
    fn test_linear_mode_blocks_on_invalid_step() {
        let (engine, controls) = engine_with(5, true);
        controls[2].set_valid(false);
        let attempts = capture_attempts(&engine);

        assert!(!engine.navigate_to(4));
        assert_eq!(engine.selected_index(), Some(0));
        assert_eq!(attempts.lock()[0].reason, Some(BlockReason::Validation));

        controls[2].set_valid(true);
        assert!(engine.navigate_to(4));
        assert_eq!(engine.selected_index(), Some(4));
    }

    #[test]
    fn test_linear_mode_allows_up_to_invalid_step() {
        let (engine, controls) = engine_with(5, true);
        controls[2].set_valid(false);

        assert!(engine.navigate_to(2));
        assert!(!engine.can_next());
        assert!(!engine.next());
        assert!(engine.previous());
    }

    #[test]
    fn test_validation_block_marks_current_step_touched() {
        let (engine, controls) = engine_with(3, true);
        controls[0].set_valid(false);

        assert!(!engine.next());
        assert!(controls[0].is_touched());
        assert!(!controls[1].is_touched());
    }

    #[test]
    fn test_boundary_block_does_not_touch() {
        let (engine, controls) = engine_with(2, true);
        assert!(!engine.previous());
        assert!(!controls[0].is_touched());
    }

    #[test]
    fn test_non_linear_ignores_validity() {
        let (engine, controls) = engine_with(5, false);
        for control in &controls {
            control.set_valid(false);
        }
        assert!(engine.navigate_to(4));
        assert_eq!(engine.selected_index(), Some(4));
    }

    #[test]
    fn test_backward_never_gated() {
        let (engine, controls) = engine_with(5, true);
        assert!(engine.navigate_to(3));
        for control in &controls {
            control.set_valid(false);
        }
        assert!(engine.navigate_to(1));
        assert!(engine.previous());
    }

    #[test]
    fn test_navigate_to_current_is_silent_success() {
        let (engine, _controls) = engine_with(3, true);
        let changes = Arc::new(Mutex::new(0));
        let changes_clone = changes.clone();
        engine
            .selection_changed()
            .connect(move |_| *changes_clone.lock() += 1);

        assert!(engine.navigate_to(0));
        assert_eq!(*changes.lock(), 0);

        assert!(engine.navigate_to(1));
        assert_eq!(*changes.lock(), 1);
    }

    #[test]
    fn test_successful_navigation_emits_no_attempt() {
        let (engine, _controls) = engine_with(3, false);
        let attempts = capture_attempts(&engine);
        engine.next();
        engine.navigate_to(0);
        assert!(attempts.lock().is_empty());
    }

    #[test]
    fn test_progress_percentage() {
        let (engine, _controls) = engine_with(30, false);
        assert_eq!(engine.progress_percentage(), 3);
        engine.navigate_to(29);
        assert_eq!(engine.progress_percentage(), 100);

        let (engine, _controls) = engine_with(3, false);
        engine.navigate_to(1);
        assert_eq!(engine.progress_percentage(), 67);
    }

    #[test]
    fn test_reset_then_navigate() {
        let (mut engine, controls) = engine_with(6, false);
        engine.navigate_to(4);
        controls[1].mark_all_touched();

        engine.reset();
        assert_eq!(engine.selected_index(), Some(0));
        assert!(!controls[1].is_touched());

        for k in 0..6 {
            engine.reset();
            assert!(engine.navigate_to(k));
            assert_eq!(engine.selected_index(), Some(k));
        }
    }

    #[test]
    fn test_set_steps_clamps_selection() {
        let (mut engine, _controls) = engine_with(5, false);
        engine.navigate_to(4);

        engine.set_steps(vec![Step::new(), Step::new()]);
        assert_eq!(engine.selected_index(), Some(1));

        engine.set_steps(Vec::new());
        assert_eq!(engine.selected_index(), None);
    }

    #[test]
    fn test_set_steps_empty_is_silent() {
        let (mut engine, _controls) = engine_with(5, false);
        engine.navigate_to(4);

        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        engine
            .selection_changed()
            .connect(move |change| changes_clone.lock().push(*change));

        engine.set_steps(Vec::new());
        assert_eq!(engine.selected_index(), None);
        assert!(changes.lock().is_empty());

        engine.set_steps(vec![Step::new(), Step::new()]);
        assert_eq!(engine.selected_index(), Some(0));
        assert!(changes.lock().is_empty());
    }

    #[test]
    fn test_can_navigate_to_step_out_of_range() {
        let (engine, _controls) = engine_with(3, true);
        assert!(engine.can_navigate_to_step(2));
        assert!(!engine.can_navigate_to_step(3));
        assert!(!engine.can_navigate_to_step(20_000_000));
        assert!(!engine.can_navigate_to_step(usize::MAX));

        let (engine, _controls) = engine_with(3, false);
        assert!(!engine.can_navigate_to_step(3));
        assert!(engine.can_navigate_to_step(2));
    }

    #[test]
    fn test_set_steps_releases_old_controls() {
        let (mut engine, controls) = engine_with(3, true);
        assert_eq!(controls[0].status_changes().connection_count(), 1);

        engine.set_steps(vec![Step::new()]);
        assert!(controls.iter().all(|c| c.status_changes().connection_count() == 0));

        controls[0].set_valid(false);
        assert_eq!(engine.step_validity(0), None);
    }

    #[test]
    fn test_drop_releases_subscriptions() {
        let (engine, controls) = engine_with(2, true);
        drop(engine);
        assert!(controls.iter().all(|c| c.status_changes().connection_count() == 0));
    }

    #[test]
    fn test_validate_step_and_all() {
        let controls: Vec<_> = [true, false, true]
            .into_iter()
            .map(|valid| Arc::new(StepControl::new(valid)))
            .collect();
        let mut steps: Vec<Step> = controls
            .iter()
            .map(|c| Step::new().with_control(c.clone()))
            .collect();
        steps.push(Step::new());
        let engine = StepperEngine::with_steps(StepperConfig::default(), steps);

        assert!(engine.validate_step(0));
        assert!(!engine.validate_step(1));
        assert!(controls[1].is_touched());
        assert!(engine.validate_step(3));
        assert!(!engine.validate_step(9));

        assert!(!engine.validate_all());
        controls[1].set_valid(true);
        assert!(engine.validate_all());
        assert!(engine.all_valid());
    }

    #[test]
    fn test_marker_statuses_and_labels() {
        let (engine, _controls) = engine_with(10, false);
        engine.navigate_to(5);

        let statuses = engine.marker_statuses();
        assert_eq!(statuses.len(), 7);
        assert_eq!(statuses[0], (NavMarker::Step { index: 3 }, Some(StepStatus::Completed)));
        assert_eq!(statuses[2], (NavMarker::Step { index: 5 }, Some(StepStatus::Active)));
        assert_eq!(statuses[3], (NavMarker::Gap, None));
        assert_eq!(statuses[4], (NavMarker::Step { index: 7 }, Some(StepStatus::Pending)));

        assert_eq!(engine.step_label(0), "✓");
        assert_eq!(engine.step_label(5), "6");
        assert_eq!(engine.step_label(9), "10");
    }

    #[test]
    fn test_all_steps_summary() {
        let engine = StepperEngine::with_steps(
            StepperConfig::default(),
            vec![Step::new().with_title("Intro"), Step::new().with_subtitle("Notes")],
        );
        let summary = engine.all_steps_summary();
        assert_eq!(summary[0].title, "Intro");
        assert_eq!(summary[1].id, 2);
        assert_eq!(summary[1].title, "Step 2");
        assert_eq!(summary[1].subtitle, "Notes");
    }

    #[test]
    fn test_steps_visible_toggle() {
        let engine = StepperEngine::default();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        engine
            .steps_visible_changed()
            .connect(move |change| seen_clone.lock().push(change.current));

        assert!(!engine.steps_visible());
        engine.toggle_steps_visible();
        assert!(engine.steps_visible());
        engine.set_steps_visible(true);
        engine.toggle_steps_visible();
        assert_eq!(*seen.lock(), vec![true, false]);
    }

    #[test]
    fn test_gap_and_step_clicks() {
        let (engine, _controls) = engine_with(10, false);
        let overviews = Arc::new(Mutex::new(0));
        let overviews_clone = overviews.clone();
        engine
            .overview_requested
            .connect(move |_| *overviews_clone.lock() += 1);

        engine.gap_activated();
        assert_eq!(*overviews.lock(), 1);

        assert!(engine.step_clicked(8));
        assert_eq!(engine.selected_index(), Some(8));
    }

    #[test]
    fn test_available_width_resizes_window() {
        let (mut engine, _controls) = engine_with(20, false);
        let sizes = Arc::new(Mutex::new(Vec::new()));
        let sizes_clone = sizes.clone();
        engine
            .window_size_changed
            .connect(move |&size| sizes_clone.lock().push(size));

        engine.set_available_width(400.0);
        engine.set_available_width(410.0);
        engine.set_available_width(80.0);

        assert_eq!(*sizes.lock(), vec![5, 3]);
        assert_eq!(engine.window_size(), 3);
        assert_eq!(engine.visible_markers().len(), 7);
    }

    #[test]
    fn test_swipe_navigation() {
        let (mut engine, _controls) = engine_with(3, false);
        let ms = Duration::from_millis;

        engine.touch_start(TouchPoint::new(100.0, 50.0), ms(0), TouchTarget::Content);
        let outcome = engine.touch_end(TouchPoint::new(30.0, 55.0), ms(100));
        assert_eq!(
            outcome,
            SwipeOutcome {
                intent: SwipeIntent::Next,
                navigated: true
            }
        );
        assert_eq!(engine.selected_index(), Some(1));

        engine.touch_start(TouchPoint::new(30.0, 50.0), ms(1000), TouchTarget::Content);
        let outcome = engine.touch_end(TouchPoint::new(100.0, 50.0), ms(1100));
        assert_eq!(outcome.intent, SwipeIntent::Previous);
        assert_eq!(engine.selected_index(), Some(0));

        engine.touch_start(TouchPoint::new(30.0, 50.0), ms(2000), TouchTarget::Content);
        let outcome = engine.touch_end(TouchPoint::new(100.0, 50.0), ms(2100));
        assert_eq!(outcome.intent, SwipeIntent::Previous);
        assert!(!outcome.navigated);
    }

    #[test]
    fn test_reset_cancels_pending_touch() {
        let (mut engine, _controls) = engine_with(3, false);
        engine.touch_start(
            TouchPoint::new(100.0, 50.0),
            Duration::ZERO,
            TouchTarget::Content,
        );
        engine.reset();
        let outcome = engine.touch_end(TouchPoint::new(0.0, 50.0), Duration::from_millis(50));
        assert_eq!(outcome.intent, SwipeIntent::None);
    }

    #[test]
    fn test_attempt_serialization() {
        let attempt = NavigationAttempt {
            from: 0,
            to: -1,
            allowed: false,
            reason: Some(BlockReason::Boundary),
        };
        let json = serde_json::to_string(&attempt).unwrap();
        assert_eq!(json, r#"{"from":0,"to":-1,"allowed":false,"reason":"boundary"}"#);
    }
}
