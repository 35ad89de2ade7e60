//! Lifecycle signals: ordered subscriber lists for storage events.
//!
//! Every component storage carries three signals (construct, update,
//! remove). Emission is synchronous and runs to completion; subscribers
//! fire in registration order.

use std::fmt;

use burrow_foundation::Entity;

/// Handle identifying one subscription on a [`Signal`].
///
/// Rust closures have no structural equality, so disconnection goes
/// through the handle returned by [`Signal::connect`] instead of matching
/// the callback value itself.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SubscriberId(u64);

type Callback<T> = Box<dyn FnMut(Entity, &mut T)>;

/// An insertion-ordered list of subscriber callbacks.
///
/// Subscribers must not add or remove entries in the storage that owns the
/// signal while it is emitting; the swap-remove layout invalidates
/// in-flight dense positions. The borrow checker rules this out for
/// storage-owned signals, since emission holds the storage mutably.
pub struct Signal<T> {
    subscribers: Vec<(SubscriberId, Callback<T>)>,
    next_id: u64,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Signal<T> {
    /// Creates a signal with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// Appends a subscriber and returns its handle.
    pub fn connect(&mut self, callback: impl FnMut(Entity, &mut T) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Removes the subscriber behind the given handle.
    ///
    /// Returns false if the handle was already disconnected. The relative
    /// order of the remaining subscribers is preserved.
    pub fn disconnect(&mut self, id: SubscriberId) -> bool {
        match self.subscribers.iter().position(|(sid, _)| *sid == id) {
            Some(position) => {
                self.subscribers.remove(position);
                true
            }
            None => false,
        }
    }

    /// Invokes every current subscriber in registration order.
    ///
    /// All subscribers receive the same entity and a mutable borrow of the
    /// same value.
    pub fn emit(&mut self, entity: Entity, value: &mut T) {
        for (_, callback) in &mut self.subscribers {
            callback(entity, value);
        }
    }

    /// Returns the number of connected subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if no subscribers are connected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
