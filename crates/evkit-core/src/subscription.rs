#![forbid(unsafe_code)]

//! Subscription tokens and the RAII guard around them.
//!
//! A [`Subscription`] is the capability returned by `Event::subscribe`: a
//! weak, non-owning link to the event's registry plus the identity of one
//! registered handler. It never keeps the registry alive — the supported
//! direction is tokens outliving their event, not the other way around.
//!
//! # Invariants
//!
//! 1. `unsubscribe` is one-shot, idempotent, and terminal: the link is
//!    cleared atomically with the removal attempt, so repeated calls are
//!    no-ops and `is_valid` reports `false` forever after.
//! 2. `is_valid` reflects reality at call time: `true` iff the link is
//!    still held *and* the registry still exists.
//! 3. A default-constructed token is already invalid and all operations on
//!    it are no-ops.

use std::fmt;
use std::sync::Weak;

/// Type-erased handle a token uses to remove its handler from a registry.
/// Implemented by the event registry; erased so `Subscription` is not
/// generic over the payload type.
pub(crate) trait Detach: Send + Sync {
    /// Remove the handler stored under `id`. Missing identities are a no-op.
    fn detach(&self, id: u64);
}

struct Link {
    registry: Weak<dyn Detach>,
    id: u64,
}

/// Capability token for one registered handler.
///
/// Obtained from `Event::subscribe`. Dropping the token does **not**
/// deregister the handler; call [`unsubscribe`](Subscription::unsubscribe)
/// or wrap the token in a [`ScopedSubscription`].
///
/// The token holds no strong reference to the event: if the event is
/// dropped first, the token lazily observes that — `is_valid` turns `false`
/// and `unsubscribe` becomes a safe no-op.
#[derive(Default)]
pub struct Subscription {
    link: Option<Link>,
}

impl Subscription {
    pub(crate) fn new(registry: Weak<dyn Detach>, id: u64) -> Self {
        Self {
            link: Some(Link { registry, id }),
        }
    }

    /// Remove this token's handler from its event, if both still exist.
    ///
    /// Cannot fail observably: an already-unsubscribed token and a dropped
    /// event both mean the goal is already achieved. After the first call
    /// the token is permanently invalid.
    ///
    /// A dispatch already in flight on another thread may still deliver to
    /// the handler one final time; the handler is guaranteed absent from
    /// every snapshot taken after this call returns.
    pub fn unsubscribe(&mut self) {
        if let Some(link) = self.link.take() {
            if let Some(registry) = link.registry.upgrade() {
                registry.detach(link.id);
            }
        }
    }

    /// Whether this token still refers to a live registration: it has not
    /// been unsubscribed and the owning event still exists.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.link
            .as_ref()
            .is_some_and(|link| link.registry.strong_count() > 0)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("valid", &self.is_valid())
            .finish()
    }
}

/// RAII wrapper owning one [`Subscription`], unsubscribed on drop.
///
/// Overwriting a `ScopedSubscription` via assignment drops the previous
/// value first, which unsubscribes its handler before the new guard takes
/// over. Moving out leaves nothing behind to drop, so a moved-from guard
/// never double-unsubscribes.
#[derive(Debug, Default)]
#[must_use = "dropping a ScopedSubscription immediately unsubscribes the handler"]
pub struct ScopedSubscription {
    subscription: Subscription,
}

impl ScopedSubscription {
    /// Wrap an existing token.
    pub fn new(subscription: Subscription) -> Self {
        Self { subscription }
    }

    /// Whether the wrapped token is still live.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.subscription.is_valid()
    }

    /// Escape the guard: hand back the inner token without unsubscribing.
    #[must_use]
    pub fn release(mut self) -> Subscription {
        std::mem::take(&mut self.subscription)
    }
}

impl Drop for ScopedSubscription {
    fn drop(&mut self) {
        self.subscription.unsubscribe();
    }
}

impl From<Subscription> for ScopedSubscription {
    fn from(subscription: Subscription) -> Self {
        Self::new(subscription)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
