//! Reactive property cell.
//!
//! [`Property<T>`] wraps a value behind a lock and reports whether a write
//! actually changed it. It carries no notification of its own; pair it with
//! a [`Signal`](crate::Signal) (as [`Store`](crate::Store) does) to tell
//! observers about changes.
//!
//! # Example
//!
//! ```
//! use sitebook_core::Property;
//!
//! let prop = Property::new(42);
//! assert!(!prop.set(42));
//! assert!(prop.set(100));
//! assert_eq!(prop.get(), 100);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A value cell with change detection.
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

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// If the new value equals the current one, nothing is written.
    pub fn set(&self, value: T) -> bool {
        self.replace(value).is_some()
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }

    /// Modify the value in place, returning the old value if the edit changed it.
    ///
    /// The write lock is held for the duration of `f`; do not touch the same
    /// property from inside the closure.
    pub fn update<F>(&self, f: F) -> Option<T>
    where
        F: FnOnce(&mut T),
    {
        let mut current = self.value.write();
        let before = current.clone();
        f(&mut current);
        if *current != before { Some(before) } else { None }
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
