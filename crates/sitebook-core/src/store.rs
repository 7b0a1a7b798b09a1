//! Observable stores.
//!
//! A [`Store<T>`] is a shared, observable value with a read / write /
//! subscribe contract. Clones of a store are handles onto the same value, so
//! a store can be handed down explicitly to every screen that needs it
//! instead of living in a process-wide singleton.
//!
//! Writes that leave the value unchanged are not broadcast. Subscribers run
//! synchronously on the writing thread after the new value is in place, so a
//! subscriber that calls [`Store::get`] sees the value it was notified about.
//!
//! # Example
//!
//! ```
//! use sitebook_core::Store;
//!
//! let filter = Store::new(String::new());
//! let sub = filter.subscribe_scoped(|text: &String| println!("filter = {text}"));
//!
//! filter.set("cement".to_string());
//! drop(sub);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;
use crate::logging::targets;
use crate::property::Property;
use crate::signal::{ConnectionGuard, ConnectionId, Signal};

struct StoreInner<T> {
    name: &'static str,
    value: Property<T>,
    changed: Signal<T>,
}

/// A shared observable value.
pub struct Store<T> {
    inner: Arc<StoreInner<T>>,
}

impl<T> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Store<T>
where
    T: Clone + PartialEq + Send + Sync + 'static,
{
    /// Create an anonymous store holding `value`.
    pub fn new(value: T) -> Self {
        Self::named("store", value)
    }

    /// Create a store with a name used in log output.
    pub fn named(name: &'static str, value: T) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                name,
                value: Property::new(value),
                changed: Signal::new(),
            }),
        }
    }

    /// The store's log name.
    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.inner.value.get()
    }

    /// Borrow the current value for the duration of `f`.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.value.with(f)
    }

    /// Replace the value. Returns `true` and notifies subscribers if it changed.
    pub fn set(&self, value: T) -> bool {
        match self.inner.value.replace(value) {
            Some(_) => {
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Edit the value in place. Returns `true` and notifies subscribers if it changed.
    pub fn update<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut T),
    {
        match self.inner.value.update(f) {
            Some(_) => {
                self.notify();
                true
            }
            None => false,
        }
    }

    /// Register a callback invoked with the new value after every change.
    pub fn subscribe<F>(&self, subscriber: F) -> ConnectionId
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.inner.changed.connect(subscriber);
        tracing::debug!(
            target: targets::STORE,
            store = self.inner.name,
            subscribers = self.inner.changed.connection_count(),
            "subscriber added"
        );
        id
    }

    /// Like [`subscribe`](Self::subscribe), but unsubscribes when the guard drops.
    pub fn subscribe_scoped<F>(&self, subscriber: F) -> ConnectionGuard<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.inner.changed.connect_scoped(subscriber)
    }

    /// Remove a subscriber.
    pub fn unsubscribe(&self, id: ConnectionId) -> Result<(), StoreError> {
        if self.inner.changed.disconnect(id) {
            Ok(())
        } else {
            Err(StoreError::UnknownSubscription {
                store: self.inner.name,
            })
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.changed.connection_count()
    }

    fn notify(&self) {
        tracing::trace!(target: targets::STORE, store = self.inner.name, "value changed");
        let value = self.inner.value.get();
        self.inner.changed.emit(value);
    }
}

impl<T> Default for Store<T>
where
    T: Clone + PartialEq + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug + 'static> fmt::Debug for Store<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.inner.name)
            .field("value", &self.inner.value.get())
            .field("subscribers", &self.inner.changed.connection_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(Store<Option<String>>: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_set_notifies_only_on_change() {
        let store = Store::new(1);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let seen_clone = seen.clone();
        store.subscribe(move |v| seen_clone.lock().push(*v));

        assert!(store.set(2));
        assert!(!store.set(2));
        assert!(store.set(3));

        assert_eq!(*seen.lock(), vec![2, 3]);
    }

    #[test]
    fn test_clones_share_state() {
        let a = Store::new("x".to_string());
        let b = a.clone();
        b.set("y".to_string());
        assert_eq!(a.get(), "y");
    }

    #[test]
    fn test_subscriber_sees_new_value_through_get() {
        let store = Store::new(0);
        let observed = Arc::new(Mutex::new(None));

        let observed_clone = observed.clone();
        let reader = store.clone();
        store.subscribe(move |_| *observed_clone.lock() = Some(reader.get()));

        store.set(7);
        assert_eq!(*observed.lock(), Some(7));
    }

    #[test]
    fn test_update_in_place() {
        let store = Store::new(vec!["a"]);
        let hits = Arc::new(Mutex::new(0));
        let hits_clone = hits.clone();
        store.subscribe(move |_| *hits_clone.lock() += 1);

        assert!(store.update(|v| v.push("b")));
        assert!(!store.update(|_| {}));
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn test_unsubscribe() {
        let store = Store::named("counter", 0);
        let id = store.subscribe(|_| {});
        assert_eq!(store.subscriber_count(), 1);
        assert!(store.unsubscribe(id).is_ok());
        assert_eq!(
            store.unsubscribe(id),
            Err(StoreError::UnknownSubscription { store: "counter" })
        );
    }

    #[test]
    fn test_scoped_subscription() {
        let store = Store::new(0);
        {
            let _sub = store.subscribe_scoped(|_| {});
            assert_eq!(store.subscriber_count(), 1);
        }
        assert_eq!(store.subscriber_count(), 0);
    }

    #[test]
    fn test_debug_shows_value_and_subscribers() {
        let store = Store::named("project", Some("p1".to_string()));
        store.subscribe(|_| {});
        let out = format!("{store:?}");
        assert!(out.contains("project"));
        assert!(out.contains("p1"));
        assert!(out.contains("subscribers: 1"));
    }
}
