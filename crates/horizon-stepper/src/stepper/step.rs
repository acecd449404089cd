//! Step descriptors handed to the engine by the host.
//!
//! The engine never owns step content. A [`Step`] carries the labels the
//! header and overview need, plus an optional shared [`StepControl`] through
//! which the host reports validity and receives "show your errors" and
//! "clear yourself" requests.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use horizon_stepper_core::{Property, Signal};

/// Host-owned validity carrier of one step, typically backed by a form group.
pub struct StepControl {
    valid: Property<bool>,
    touched: Property<bool>,
    status_changed: Arc<Signal<bool>>,
    /// Emitted by [`mark_all_touched`](Self::mark_all_touched) so the host
    /// can reveal field errors.
    pub touched_changed: Signal<bool>,
    /// Emitted by [`reset`](Self::reset); the host clears the step's content.
    pub reset_requested: Signal<()>,
}

impl StepControl {
    /// Create a control with an initial validity.
    pub fn new(valid: bool) -> Self {
        Self {
            valid: Property::new(valid),
            touched: Property::new(false),
            status_changed: Arc::new(Signal::new()),
            touched_changed: Signal::new(),
            reset_requested: Signal::new(),
        }
    }

    /// Last reported validity.
    pub fn is_valid(&self) -> bool {
        self.valid.get()
    }

    /// Report a new validity. Emits on `status_changes` only when it changed.
    pub fn set_valid(&self, valid: bool) -> bool {
        let changed = self.valid.set(valid);
        if changed {
            self.status_changed.emit(valid);
        }
        changed
    }

    /// Stream of validity changes.
    pub fn status_changes(&self) -> &Arc<Signal<bool>> {
        &self.status_changed
    }

    /// Whether the step was asked to show its errors.
    pub fn is_touched(&self) -> bool {
        self.touched.get()
    }

    /// Ask the step to show every field error.
    pub fn mark_all_touched(&self) {
        if self.touched.set(true) {
            self.touched_changed.emit(true);
        }
    }

    /// Ask the step to clear itself.
    pub fn reset(&self) {
        if self.touched.set(false) {
            self.touched_changed.emit(false);
        }
        self.reset_requested.emit(());
    }
}

impl Default for StepControl {
    fn default() -> Self {
        Self::new(true)
    }
}

impl fmt::Debug for StepControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepControl")
            .field("valid", &self.valid.get())
            .field("touched", &self.touched.get())
            .finish()
    }
}

/// One registered step.
#[derive(Debug, Clone, Default)]
pub struct Step {
    title: Option<String>,
    subtitle: Option<String>,
    control: Option<Arc<StepControl>>,
}

impl Step {
    /// Create an untitled step without a control.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builder Pattern Methods
    // =========================================================================

    /// Set the title using builder pattern.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the subtitle using builder pattern.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    /// Attach a validity control using builder pattern.
    pub fn with_control(mut self, control: Arc<StepControl>) -> Self {
        self.control = Some(control);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    pub fn control(&self) -> Option<&Arc<StepControl>> {
        self.control.as_ref()
    }

    /// Current validity; steps without a control are always valid.
    pub fn is_valid(&self) -> bool {
        self.control.as_ref().is_none_or(|control| control.is_valid())
    }

    /// Overview entry for this step at `index`.
    pub fn summary(&self, index: usize) -> StepSummary {
        let id = index + 1;
        StepSummary {
            id,
            title: self
                .title
                .clone()
                .unwrap_or_else(|| format!("Step {id}")),
            subtitle: self.subtitle.clone().unwrap_or_default(),
        }
    }
}

/// Position of a step relative to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Completed,
    Active,
    Pending,
}

impl StepStatus {
    /// Status of `index` when `selected` is the active step.
    pub fn of(index: usize, selected: usize) -> Self {
        use std::cmp::Ordering;
        match index.cmp(&selected) {
            Ordering::Less => Self::Completed,
            Ordering::Equal => Self::Active,
            Ordering::Greater => Self::Pending,
        }
    }
}

/// One row of the all-steps overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSummary {
    /// 1-based ordinal.
    pub id: usize,
    pub title: String,
    pub subtitle: String,
}
