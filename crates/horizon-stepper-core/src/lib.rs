//! Core primitives for Horizon Stepper.
//!
//! This crate provides the reactive building blocks the stepper engine is
//! made of:
//!
//! - **Signal/Slot System**: Type-safe notifications with owned subscriptions
//! - **Property System**: Change-detecting values and observables
//! - **Logging**: Tracing targets and timing spans
//!
//! # Signal/Slot Example
//!
//! ```
//! use horizon_stepper_core::Signal;
//!
//! let validity_changed = Signal::<bool>::new();
//!
//! let conn_id = validity_changed.connect(|valid| {
//!     println!("Step is now {}", if *valid { "valid" } else { "invalid" });
//! });
//!
//! validity_changed.emit(true);
//! validity_changed.disconnect(conn_id);
//! ```
//!
//! # Scoped Subscriptions
//!
//! ```
//! use std::sync::Arc;
//! use horizon_stepper_core::{Signal, SubscriptionGroup};
//!
//! let first = Arc::new(Signal::<bool>::new());
//! let second = Arc::new(Signal::<bool>::new());
//!
//! let mut group = SubscriptionGroup::new();
//! group.push(Signal::subscribe(&first, |_| {}));
//! group.push(Signal::subscribe(&second, |_| {}));
//!
//! group.release_all();
//! assert_eq!(first.connection_count() + second.connection_count(), 0);
//! ```

pub mod logging;
pub mod property;
pub mod signal;

pub use logging::PerfSpan;
pub use property::{Change, Observable, Property};
pub use signal::{ConnectionId, Signal, SignalEmitter, Subscription, SubscriptionGroup};
