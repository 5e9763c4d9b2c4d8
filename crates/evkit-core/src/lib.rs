#![forbid(unsafe_code)]

//! Thread-safe publish/subscribe primitives for EvKit.
//!
//! # Role in EvKit
//! `evkit-core` is the dispatch kernel. An [`Event<T>`] fans a payload out
//! to registered handlers synchronously on the calling thread; a
//! [`Subscription`] is the capability that deregisters one handler; a
//! [`ScopedSubscription`] ties that deregistration to a scope.
//!
//! # Delivery contract
//! - Synchronous: `notify` returns after the last handler does.
//! - Registration order within one `notify` call; no ordering across
//!   events or across concurrent `notify` calls.
//! - Snapshot semantics: handlers added or removed during a dispatch do not
//!   affect that dispatch.
//! - A panicking handler aborts the rest of its snapshot and propagates.
//!
//! # Lifetime contract
//! Subscriptions never keep their event alive. Dropping the event lazily
//! invalidates every outstanding token: `is_valid` turns `false` and
//! `unsubscribe` becomes a safe no-op.
//!
//! # How it fits in the system
//! `evkit-reactive` layers value semantics on top: properties, observable
//! objects, and observable collections all hold `Event`s internally and
//! call `notify` when their state changes.

pub mod event;
pub mod subscription;

pub use event::Event;
pub use subscription::{ScopedSubscription, Subscription};
