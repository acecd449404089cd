//! Stepper navigation and state.
//!
//! The pieces, leaves first:
//!
//! - [`gesture`]: classifies touch strokes into next/previous intents
//! - [`paginator`]: decides which step markers the header shows
//! - [`validation`]: remembers the last-known validity of every step
//! - [`step`]: step descriptors and their host-owned controls
//! - [`engine`]: the state machine that ties them together

pub mod engine;
pub mod gesture;
pub mod paginator;
pub mod step;
pub mod validation;

pub use engine::{BlockReason, NavigationAttempt, StepperEngine, SwipeOutcome};
pub use gesture::{
    GestureConfig, InteractiveKind, SwipeClassifier, SwipeIntent, TouchPoint, TouchTarget,
};
pub use paginator::{NavMarker, WindowPaginator, visible_markers, window_size_for_width};
pub use step::{Step, StepControl, StepStatus, StepSummary};
pub use validation::{ValidationTracker, ValidityChange};
