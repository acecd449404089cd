//! Prelude module for Horizon Stepper.
//!
//! ```
//! use horizon_stepper::prelude::*;
//! ```
//!
//! This provides access to:
//! - The engine and its navigation reports (`StepperEngine`, `NavigationAttempt`)
//! - Step descriptors (`Step`, `StepControl`)
//! - Touch input types (`TouchPoint`, `TouchTarget`)
//! - Configuration and errors (`StepperConfig`, `StepperError`)

// ============================================================================
// Signals and Observables
// ============================================================================

pub use horizon_stepper_core::{Change, Signal, Subscription, SubscriptionGroup};

// ============================================================================
// Engine
// ============================================================================

pub use crate::stepper::{
    BlockReason, NavMarker, NavigationAttempt, StepStatus, StepSummary, StepperEngine,
    SwipeOutcome,
};

// ============================================================================
// Steps and Input
// ============================================================================

pub use crate::stepper::{InteractiveKind, Step, StepControl, SwipeIntent, TouchPoint, TouchTarget};

// ============================================================================
// Configuration
// ============================================================================

pub use crate::config::{PaginationConfig, StepperConfig, SwipeConfig};
pub use crate::error::StepperError;
