//! Type-indexed singleton store for non-entity global state.
//!
//! [`Resources`] is a boundary collaborator: the entity/component core
//! never depends on it, and callers may use both independently.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::fmt;

/// One boxed value per type.
#[derive(Default)]
pub struct Resources {
    values: HashMap<TypeId, Box<dyn Any>>,
}

impl Resources {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a value, returning the displaced value of the same type.
    pub fn insert<T: 'static>(&mut self, value: T) -> Option<T> {
        self.values
            .insert(TypeId::of::<T>(), Box::new(value))
            .and_then(downcast_boxed)
    }

    /// Returns the stored value of type `T`, if any.
    #[must_use]
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.values.get(&TypeId::of::<T>())?.downcast_ref()
    }

    /// Returns the stored value of type `T` mutably, if any.
    #[must_use]
    pub fn get_mut<T: 'static>(&mut self) -> Option<&mut T> {
        self.values.get_mut(&TypeId::of::<T>())?.downcast_mut()
    }

    /// Removes and returns the stored value of type `T`.
    pub fn remove<T: 'static>(&mut self) -> Option<T> {
        self.values
            .remove(&TypeId::of::<T>())
            .and_then(downcast_boxed)
    }

    /// Checks whether a value of type `T` is stored.
    #[must_use]
    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resources")
            .field("values", &self.values.len())
            .finish()
    }
}

fn downcast_boxed<T: 'static>(boxed: Box<dyn Any>) -> Option<T> {
    match boxed.downcast::<T>() {
        Ok(value) => Some(*value),
        Err(_) => {
            debug_assert!(false, "resource slot held a foreign type: {}", type_name::<T>());
            None
        }
    }
}
