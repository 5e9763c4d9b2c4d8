#![forbid(unsafe_code)]

//! Thread-safe broadcast events with snapshot dispatch.
//!
//! [`Event<T>`] is a process-local broadcast channel: producers call
//! [`Event::notify`], and every handler registered via [`Event::subscribe`]
//! at that moment is invoked synchronously on the calling thread.
//!
//! # Design
//!
//! The handler registry lives in shared, reference-counted storage
//! (`Arc<Mutex<..>>`). The `Event` holds the only strong reference; every
//! [`Subscription`] holds a weak one plus the identity of its handler, so
//! tokens can outlive the event without keeping the registry alive.
//!
//! `notify` copies the current handler set into a local snapshot while
//! holding the registry lock, releases the lock, then invokes the snapshot.
//! Handlers are therefore free to subscribe, unsubscribe (including
//! themselves), or notify the same event without deadlocking.
//!
//! # Invariants
//!
//! 1. Handler identities are unique for the lifetime of one `Event` and are
//!    never reused.
//! 2. Handlers are invoked in registration order within one `notify` call.
//! 3. A handler registered before a `notify` call's snapshot is invoked
//!    exactly once by that call, unless it was removed before the snapshot.
//! 4. No user code ever runs while the registry lock is held.
//!
//! # Failure Modes
//!
//! - A handler that panics propagates out of `notify` immediately; handlers
//!   after it in that snapshot are not invoked. The registry itself is
//!   unaffected and the next `notify` behaves normally.
//! - A handler removed while a dispatch is in flight on another thread may
//!   still receive that dispatch's delivery; it will be absent from every
//!   snapshot taken after `unsubscribe` returns.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use smallvec::SmallVec;
use tracing::trace;

use crate::subscription::{Detach, ScopedSubscription, Subscription};

/// Callable stored in the registry. Payloads are passed by reference and
/// handlers may run on whichever thread calls `notify`.
type Handler<T> = dyn Fn(&T) + Send + Sync;

/// Inline capacity of the per-notify handler snapshot. Dispatches to this
/// many handlers or fewer do not allocate.
const SNAPSHOT_INLINE: usize = 8;

struct HandlerEntry<T: 'static> {
    id: u64,
    handler: Arc<Handler<T>>,
}

struct RegistryState<T: 'static> {
    /// Registration order is dispatch order.
    entries: Vec<HandlerEntry<T>>,
    /// Last identity handed out. Strictly increasing, never reused.
    last_id: u64,
}

/// Shared mutable state behind one `Event`: the identity -> handler mapping
/// plus the identity counter.
pub(crate) struct Registry<T: 'static> {
    state: Mutex<RegistryState<T>>,
}

impl<T: 'static> Registry<T> {
    fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                entries: Vec::new(),
                last_id: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryState<T>> {
        // Handlers never run under this lock, so a panicking handler cannot
        // poison it.
        self.state.lock().expect("registry lock poisoned")
    }

    fn insert(&self, handler: Arc<Handler<T>>) -> u64 {
        let mut state = self.lock();
        state.last_id += 1;
        let id = state.last_id;
        state.entries.push(HandlerEntry { id, handler });
        trace!(id, handlers = state.entries.len(), "handler registered");
        id
    }

    fn snapshot(&self) -> SmallVec<[Arc<Handler<T>>; SNAPSHOT_INLINE]> {
        self.lock()
            .entries
            .iter()
            .map(|entry| Arc::clone(&entry.handler))
            .collect()
    }

    fn len(&self) -> usize {
        self.lock().entries.len()
    }
}

impl<T: 'static> Detach for Registry<T> {
    fn detach(&self, id: u64) {
        let mut state = self.lock();
        // Idempotent: a missing identity means the goal is already achieved.
        state.entries.retain(|entry| entry.id != id);
        trace!(id, handlers = state.entries.len(), "handler removed");
    }
}

/// A process-local broadcast channel for payloads of type `T`.
///
/// Any thread may call [`subscribe`](Event::subscribe),
/// [`notify`](Event::notify), or [`Subscription::unsubscribe`] at any time
/// without external synchronization. Delivery is synchronous on the calling
/// thread; there is no queueing, deferral, or cross-event ordering.
///
/// `Event` is deliberately not `Clone`: duplicating a dispatch registry has
/// no sound semantics. Moving an `Event` is fine — the registry is shared by
/// reference, so subscriptions taken before the move remain valid.
///
/// Multi-argument payloads are expressed as tuples:
///
/// ```
/// use evkit_core::Event;
///
/// let renamed: Event<(u64, String)> = Event::new();
/// let sub = renamed.subscribe(|(id, name)| {
///     let _ = (id, name);
/// });
/// renamed.notify(&(7, "spool".to_string()));
/// drop(sub);
/// ```
pub struct Event<T: 'static> {
    registry: Arc<Registry<T>>,
}

impl<T: 'static> Event<T> {
    /// Create an event with no registered handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry::new()),
        }
    }

    /// Register `handler` and return the token that removes it again.
    ///
    /// Always succeeds. The handler may capture state; it runs on whichever
    /// thread calls `notify`, hence the `Send + Sync` bounds.
    ///
    /// Dropping the returned [`Subscription`] does **not** unsubscribe — the
    /// token is a capability, not a guard. Use
    /// [`subscribe_scoped`](Event::subscribe_scoped) for RAII behavior.
    #[must_use = "dropping the token without calling unsubscribe leaves the handler registered forever"]
    pub fn subscribe<F>(&self, handler: F) -> Subscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let id = self.registry.insert(Arc::new(handler));
        let handle: Arc<dyn Detach> = self.registry.clone();
        Subscription::new(Arc::downgrade(&handle), id)
    }

    /// Register `handler` behind an RAII guard that unsubscribes on drop.
    #[must_use = "dropping a ScopedSubscription immediately unsubscribes the handler"]
    pub fn subscribe_scoped<F>(&self, handler: F) -> ScopedSubscription
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        ScopedSubscription::new(self.subscribe(handler))
    }

    /// Deliver `payload` to every currently registered handler,
    /// synchronously, in registration order.
    ///
    /// The handler set is snapshotted under the registry lock and invoked
    /// after the lock is released, so handlers may freely subscribe,
    /// unsubscribe, or notify this same event. Structural changes made by a
    /// handler never affect the in-flight snapshot.
    ///
    /// Concurrent `notify` calls each operate on their own snapshot; their
    /// relative interleaving is unspecified.
    ///
    /// # Panics
    ///
    /// A panicking handler propagates immediately and the remaining handlers
    /// in that snapshot are skipped. The registry is not corrupted; see the
    /// module docs.
    pub fn notify(&self, payload: &T) {
        let snapshot = self.registry.snapshot();
        trace!(handlers = snapshot.len(), "notify fan-out");
        for handler in &snapshot {
            handler(payload);
        }
    }

    /// Number of currently registered handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.registry.len()
    }
}

impl<T: 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
