//! Integration tests for stores and the application context.

use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use sitebook_core::{AppContext, EntityId, Signal, Store, StoreError};

#[test]
fn test_context_clones_observe_same_project() {
    let ctx = AppContext::new();
    let screen = ctx.clone();

    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();
    let _sub = screen
        .project()
        .subscribe_scoped(move |id| seen_clone.lock().push(id.clone()));

    ctx.project().select(EntityId::from("p-1"));
    ctx.project().select(EntityId::from("p-2"));

    assert_eq!(screen.project().current(), Some(EntityId::from("p-2")));
    assert_eq!(
        *seen.lock(),
        vec![Some(EntityId::from("p-1")), Some(EntityId::from("p-2"))]
    );
}

#[test]
fn test_project_required_after_clear() {
    let ctx = AppContext::new();
    ctx.project().select(EntityId::from("p-1"));
    ctx.project().clear();
    assert_eq!(ctx.project().require(), Err(StoreError::NoProjectSelected));
}

#[test]
fn test_unsubscribe_twice_is_an_error() {
    let ctx = AppContext::new();
    let id = ctx.project().subscribe(|_| {});
    assert!(ctx.project().unsubscribe(id).is_ok());
    assert!(matches!(
        ctx.project().unsubscribe(id),
        Err(StoreError::UnknownSubscription { store: "current_project" })
    ));
}

#[test]
fn test_store_writes_from_many_threads() {
    let store = Store::new(0u32);
    let notifications = Arc::new(Mutex::new(0u32));

    let counter = notifications.clone();
    store.subscribe(move |_| *counter.lock() += 1);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    store.update(|v| *v += 1);
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(store.get(), 800);
    assert_eq!(*notifications.lock(), 800);
}

#[test]
fn test_signal_carries_tuple_args() {
    let signal = Signal::<(usize, String)>::new();
    let last = Arc::new(Mutex::new(None));
    let last_clone = last.clone();
    signal.connect(move |(index, label)| *last_clone.lock() = Some((*index, label.clone())));

    signal.emit((2, "Steel Rod".to_string()));
    assert_eq!(*last.lock(), Some((2, "Steel Rod".to_string())));
}
