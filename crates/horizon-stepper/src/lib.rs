//! Horizon Stepper - navigation and state engine for multi-step forms.
//!
//! The crate holds the logic behind a stepper control and none of its
//! rendering. The host registers an ordered list of [`Step`]s, feeds in
//! touch strokes and strip widths, and renders from what the engine exposes:
//! the selected index, progress, the windowed list of step markers and the
//! overview rows.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_stepper::prelude::*;
//!
//! let contact = Arc::new(StepControl::new(true));
//! let mut engine = StepperEngine::new(StepperConfig::default());
//! engine.set_steps(vec![
//!     Step::new().with_title("Contact").with_control(contact),
//!     Step::new().with_title("Ratings"),
//!     Step::new().with_title("Summary"),
//! ]);
//!
//! engine.selection_changed().connect(|change| {
//!     println!("step {} -> {}", change.previous + 1, change.current + 1);
//! });
//!
//! assert!(engine.next());
//! assert_eq!(engine.progress_percentage(), 67);
//! ```
//!
//! [`Step`]: stepper::Step

pub use horizon_stepper_core::*;

pub mod config;
pub mod error;
pub mod prelude;
pub mod stepper;

pub use config::{ConfigFormat, PaginationConfig, StepperConfig, SwipeConfig};
pub use error::{Result, StepperError};
