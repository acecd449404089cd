//! Signal/slot system for Horizon Stepper.
//!
//! Signals are the notification channel between the stepper engine and the
//! presentation layer that hosts it. A signal owns a set of slots (callbacks)
//! and invokes all of them whenever it is emitted.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The notification channel
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`Subscription`] - Owned connection that disconnects when dropped
//! - [`SubscriptionGroup`] - A set of subscriptions released together
//!
//! # Re-entrancy
//!
//! Emission works on a snapshot of the connected slots, so a slot may
//! connect or disconnect other slots (including itself) while the signal is
//! being emitted. Changes take effect on the next emission.
//!
//! # Example
//!
//! ```
//! use horizon_stepper_core::Signal;
//!
//! let step_changed = Signal::<usize>::new();
//!
//! let conn_id = step_changed.connect(|index| {
//!     println!("Now on step {}", index + 1);
//! });
//!
//! step_changed.emit(2);
//! step_changed.disconnect(conn_id);
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// The ID stays valid until the connection is removed or the signal is dropped.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a struct/tuple for richer payloads.
///
/// # Thread Safety
///
/// `Signal<Args>` is `Send + Sync`. Slots run on the emitting thread.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use horizon_stepper_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Check whether a connection is still attached.
    pub fn is_connected(&self, id: ConnectionId) -> bool {
        self.connections.lock().contains_key(id)
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// The connection table lock is released before any slot runs.
    #[tracing::instrument(skip_all, target = "horizon_stepper_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connections.lock().len())
            .field("blocked", &self.blocked.load(Ordering::SeqCst))
            .finish()
    }
}

/// Type-erased signal access.
///
/// Lets code hold connections to signals of different argument types behind
/// one interface, which is what [`Subscription`] relies on.
pub trait SignalEmitter: Send + Sync {
    /// Disconnect a connection by ID.
    fn disconnect(&self, id: ConnectionId) -> bool;

    /// Disconnect all connections.
    fn disconnect_all(&self);

    /// Get the number of connections.
    fn connection_count(&self) -> usize;

    /// Check if blocked.
    fn is_blocked(&self) -> bool;

    /// Set blocked state.
    fn set_blocked(&self, blocked: bool);
}

impl<Args: Send + 'static> SignalEmitter for Signal<Args> {
    fn disconnect(&self, id: ConnectionId) -> bool {
        Signal::disconnect(self, id)
    }

    fn disconnect_all(&self) {
        Signal::disconnect_all(self);
    }

    fn connection_count(&self) -> usize {
        Signal::connection_count(self)
    }

    fn is_blocked(&self) -> bool {
        Signal::is_blocked(self)
    }

    fn set_blocked(&self, blocked: bool) {
        Signal::set_blocked(self, blocked);
    }
}

/// An owned connection that disconnects its slot when dropped.
///
/// Created via [`Signal::subscribe`]. The subscription keeps the signal alive
/// through an `Arc`, so it is always safe to release, even after every other
/// owner of the signal is gone.
///
/// # Example
///
/// ```
/// use horizon_stepper_core::Signal;
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// let signal = Arc::new(Signal::<bool>::new());
/// let hits = Arc::new(AtomicUsize::new(0));
/// {
///     let hits = hits.clone();
///     let _sub = Signal::subscribe(&signal, move |_| {
///         hits.fetch_add(1, Ordering::SeqCst);
///     });
///     signal.emit(true);
/// }
/// signal.emit(false); // slot already released
/// assert_eq!(hits.load(Ordering::SeqCst), 1);
/// ```
#[must_use = "dropping a Subscription disconnects it immediately"]
pub struct Subscription {
    signal: Option<Arc<dyn SignalEmitter>>,
    id: ConnectionId,
}

impl<Args: Send + 'static> Signal<Args> {
    /// Connect a slot and return an owned [`Subscription`] for it.
    pub fn subscribe<F>(signal: &Arc<Self>, slot: F) -> Subscription
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let id = signal.connect(slot);
        let emitter: Arc<dyn SignalEmitter> = signal.clone();
        Subscription {
            signal: Some(emitter),
            id,
        }
    }
}

impl Subscription {
    /// The underlying connection ID.
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Whether this subscription has not been released yet.
    pub fn is_active(&self) -> bool {
        self.signal.is_some()
    }

    /// Disconnect now. Returns `true` if the slot was still connected.
    ///
    /// Releasing twice is harmless.
    pub fn release(&mut self) -> bool {
        match self.signal.take() {
            Some(signal) => signal.disconnect(self.id),
            None => false,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

/// A collection of subscriptions acquired and released as one unit.
///
/// Used wherever a set of connections must not outlive the data it was
/// created for: the group is emptied with [`release_all`](Self::release_all)
/// before the next set is acquired, and releases whatever it still holds when
/// dropped.
#[derive(Debug, Default)]
pub struct SubscriptionGroup {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a subscription.
    pub fn push(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    /// Number of subscriptions currently held.
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    /// Whether the group holds no subscriptions.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Release every held subscription, returning how many were still connected.
    pub fn release_all(&mut self) -> usize {
        let released = self
            .subscriptions
            .drain(..)
            .map(|mut sub| sub.release())
            .filter(|&was_connected| was_connected)
            .count();
        if released > 0 {
            tracing::trace!(target: targets::SIGNAL, released, "released subscription group");
        }
        released
    }
}

impl Extend<Subscription> for SubscriptionGroup {
    fn extend<I: IntoIterator<Item = Subscription>>(&mut self, iter: I) {
        self.subscriptions.extend(iter);
    }
}

impl Drop for SubscriptionGroup {
    fn drop(&mut self) {
        self.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_signal_connect_emit() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(42);
        signal.emit(100);

        assert_eq!(*received.lock(), vec![42, 100]);
    }

    #[test]
    fn test_signal_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        let conn_id = signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        assert!(signal.disconnect(conn_id));
        assert!(!signal.disconnect(conn_id));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![1]);
    }

    #[test]
    fn test_signal_blocked() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(Mutex::new(Vec::new()));

        let received_clone = received.clone();
        signal.connect(move |&value| {
            received_clone.lock().push(value);
        });

        signal.emit(1);
        signal.set_blocked(true);
        signal.emit(2);
        signal.set_blocked(false);
        signal.emit(3);

        assert_eq!(*received.lock(), vec![1, 3]);
    }

    #[test]
    fn test_slots_run_in_connection_order() {
        let signal = Signal::<()>::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        for tag in ["a", "b", "c"] {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(tag));
        }

        signal.emit(());
        assert_eq!(*order.lock(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_disconnect_from_inside_slot() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(AtomicUsize::new(0));
        let own_id = Arc::new(Mutex::new(None));

        let sig = signal.clone();
        let cnt = count.clone();
        let id_cell = own_id.clone();
        let id = signal.connect(move |_| {
            cnt.fetch_add(1, Ordering::SeqCst);
            if let Some(id) = *id_cell.lock() {
                sig.disconnect(id);
            }
        });
        *own_id.lock() = Some(id);

        signal.emit(());
        signal.emit(());
        assert_eq!(count.load(Ordering::SeqCst), 1);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_subscription_releases_on_drop() {
        let signal = Arc::new(Signal::<i32>::new());
        let received = Arc::new(Mutex::new(Vec::new()));

        {
            let received_clone = received.clone();
            let _sub = Signal::subscribe(&signal, move |&value| {
                received_clone.lock().push(value);
            });
            signal.emit(1);
        }

        signal.emit(2);
        assert_eq!(*received.lock(), vec![1]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_subscription_release_is_idempotent() {
        let signal = Arc::new(Signal::<()>::new());
        let mut sub = Signal::subscribe(&signal, |_| {});

        assert!(sub.is_active());
        assert!(sub.release());
        assert!(!sub.is_active());
        assert!(!sub.release());
    }

    #[test]
    fn test_subscription_group_release_all() {
        let first = Arc::new(Signal::<bool>::new());
        let second = Arc::new(Signal::<String>::new());
        let mut group = SubscriptionGroup::new();

        group.push(Signal::subscribe(&first, |_| {}));
        group.push(Signal::subscribe(&first, |_| {}));
        group.push(Signal::subscribe(&second, |_| {}));
        assert_eq!(group.len(), 3);

        assert_eq!(group.release_all(), 3);
        assert!(group.is_empty());
        assert_eq!(first.connection_count(), 0);
        assert_eq!(second.connection_count(), 0);
    }

    #[test]
    fn test_subscription_group_drop_releases() {
        let signal = Arc::new(Signal::<()>::new());
        {
            let mut group = SubscriptionGroup::new();
            group.extend((0..4).map(|_| Signal::subscribe(&signal, |_| {})));
            assert_eq!(signal.connection_count(), 4);
        }
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_signal_emitter_type_erasure() {
        let signal = Signal::<u8>::new();
        signal.connect(|_| {});
        let emitter: &dyn SignalEmitter = &signal;

        assert_eq!(emitter.connection_count(), 1);
        emitter.set_blocked(true);
        assert!(signal.is_blocked());
        emitter.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_emit_from_multiple_threads() {
        let signal = Arc::new(Signal::<usize>::new());
        let counter = Arc::new(AtomicUsize::new(0));

        let counter_clone = counter.clone();
        signal.connect(move |_| {
            counter_clone.fetch_add(1, Ordering::SeqCst);
        });

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let signal = signal.clone();
                std::thread::spawn(move || signal.emit(i))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.load(Ordering::SeqCst), 8);
    }
}
