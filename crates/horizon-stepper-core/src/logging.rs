//! Logging facilities for Horizon Stepper.
//!
//! Horizon Stepper uses the `tracing` crate for instrumentation and never
//! installs a subscriber itself. To see logs, install one in the host:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("horizon_stepper=debug")
//!     .init();
//! ```
//!
//! Every subsystem logs under one of the [`targets`], so filters can be as
//! narrow as a single component.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core primitives target.
    pub const CORE: &str = "horizon_stepper_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_stepper_core::signal";
    /// Stepper engine (navigation and selection) target.
    pub const ENGINE: &str = "horizon_stepper::engine";
    /// Swipe gesture classification target.
    pub const GESTURE: &str = "horizon_stepper::gesture";
    /// Step marker windowing target.
    pub const PAGINATOR: &str = "horizon_stepper::paginator";
    /// Validity tracking target.
    pub const VALIDATION: &str = "horizon_stepper::validation";
    /// Timing spans emitted by [`super::PerfSpan`].
    pub const PERF: &str = "horizon_stepper::perf";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for timing a block of work, e.g. a step collection rebuild.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_stepper::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_are_namespaced() {
        for target in [
            targets::ENGINE,
            targets::GESTURE,
            targets::PAGINATOR,
            targets::VALIDATION,
            targets::PERF,
        ] {
            assert!(target.starts_with("horizon_stepper::"));
        }
        assert!(targets::SIGNAL.starts_with(targets::CORE));
    }

    #[test]
    fn test_perf_span() {
        let _span = PerfSpan::new("test_operation");
    }
}
