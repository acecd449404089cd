//! Property system for Horizon Stepper.
//!
//! Properties are the data backbone of the signal/slot system. A
//! [`Property<T>`] only stores a value and reports whether a write changed
//! it; an [`Observable<T>`] pairs a property with a signal so outside readers
//! can follow every committed change.
//!
//! # Example
//!
//! ```
//! use horizon_stepper_core::Observable;
//!
//! let selected = Observable::new(0usize);
//! selected.changed.connect(|change| {
//!     println!("{} -> {}", change.previous, change.current);
//! });
//!
//! assert!(selected.set(3));
//! assert!(!selected.set(3)); // unchanged, no emission
//! ```

use std::fmt;

use parking_lot::RwLock;

use crate::signal::Signal;

/// A reactive property that tracks changes.
///
/// `set()` compares the new value with the current one and returns whether
/// the value actually changed. Emitting a notification is up to the owner.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Overwrite the value without any change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the previous one if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

/// A committed change of an [`Observable`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change<T> {
    /// Value before the write.
    pub previous: T,
    /// Value after the write.
    pub current: T,
}

/// A property with built-in change notification.
///
/// The owner is the only writer; everyone else reads the value or connects
/// to [`changed`](Self::changed). Writes that do not alter the value are not
/// announced.
pub struct Observable<T> {
    value: Property<T>,
    /// Emitted after each committed change.
    pub changed: Signal<Change<T>>,
}

impl<T: Clone + PartialEq + Send + 'static> Observable<T> {
    /// Create an observable with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: Property::new(value),
            changed: Signal::new(),
        }
    }

    /// Get a copy of the current value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    /// Set the value and announce it, returning `true` if it changed.
    pub fn set(&self, value: T) -> bool {
        match self.value.replace(value.clone()) {
            Some(previous) => {
                self.changed.emit(Change {
                    previous,
                    current: value,
                });
                true
            }
            None => false,
        }
    }

    /// Overwrite the value without announcing it.
    pub fn set_silent(&self, value: T) {
        self.value.set_silent(value);
    }
}

impl<T: Clone + PartialEq + Send + Default + 'static> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value.get())
            .field("changed", &self.changed)
            .finish()
    }
}
