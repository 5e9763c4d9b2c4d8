//! Failure-propagation tests: a panicking handler aborts the remainder of
//! its snapshot, propagates to the `notify` caller, and leaves the registry
//! fully functional.

use evkit_core::Event;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[test]
fn panicking_handler_skips_later_handlers_and_propagates() {
    let event: Event<i32> = Event::new();
    let first_hits = Arc::new(AtomicUsize::new(0));
    let second_hits = Arc::new(AtomicUsize::new(0));

    let first_in = Arc::clone(&first_hits);
    let mut panicky = event.subscribe(move |v| {
        first_in.fetch_add(1, Ordering::Relaxed);
        assert!(*v != 42, "refusing payload 42");
    });
    let second_in = Arc::clone(&second_hits);
    let _quiet = event.subscribe(move |_| {
        second_in.fetch_add(1, Ordering::Relaxed);
    });

    // Benign payload: both run, nothing propagates.
    event.notify(&1);
    assert_eq!(first_hits.load(Ordering::Relaxed), 1);
    assert_eq!(second_hits.load(Ordering::Relaxed), 1);

    // Poison payload: the panic reaches the caller and the second handler
    // is skipped for that dispatch.
    let outcome = catch_unwind(AssertUnwindSafe(|| event.notify(&42)));
    assert!(outcome.is_err());
    assert_eq!(first_hits.load(Ordering::Relaxed), 2);
    assert_eq!(second_hits.load(Ordering::Relaxed), 1);

    // The registry is intact: remove the offender and dispatch normally.
    panicky.unsubscribe();
    event.notify(&42);
    assert_eq!(first_hits.load(Ordering::Relaxed), 2);
    assert_eq!(second_hits.load(Ordering::Relaxed), 2);
}

#[test]
fn registry_usable_while_panicky_handler_remains() {
    let event: Event<i32> = Event::new();
    let hits = Arc::new(AtomicUsize::new(0));

    let _panicky = event.subscribe(|v| {
        assert!(*v != 42, "refusing payload 42");
    });
    let hits_in = Arc::clone(&hits);
    let _counter = event.subscribe(move |_| {
        hits_in.fetch_add(1, Ordering::Relaxed);
    });

    let _ = catch_unwind(AssertUnwindSafe(|| event.notify(&42)));

    // Same handlers, benign payload: full delivery resumes.
    event.notify(&1);
    assert_eq!(hits.load(Ordering::Relaxed), 1);
    assert_eq!(event.handler_count(), 2);
}

#[test]
fn subscribe_after_handler_panic_works() {
    let event: Event<i32> = Event::new();
    let _panicky = event.subscribe(|_| panic!("always"));

    let _ = catch_unwind(AssertUnwindSafe(|| event.notify(&1)));

    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in = Arc::clone(&hits);
    let _late = event.subscribe(move |_| {
        hits_in.fetch_add(1, Ordering::Relaxed);
    });
    assert_eq!(event.handler_count(), 2);
}
