#![forbid(unsafe_code)]

//! Reactive value layers for EvKit.
//!
//! # Role in EvKit
//! `evkit-reactive` builds value semantics on top of the `evkit-core`
//! dispatch kernel:
//!
//! - [`Property`] / [`ReadonlyProperty`]: value wrappers with pluggable
//!   accessor logic and plain-value ergonomics. No events of their own.
//! - [`ObservableObject`]: a composable notifier raising
//!   `property_changing` / `property_changed` around field mutations.
//! - [`ObservableCollection`]: an ordered sequence raising
//!   `collection_changing` / `collection_changed` around structural
//!   mutations.
//!
//! All notification flows through [`Event`]: synchronous, on the mutating
//! thread, with the dispatch and lifetime contracts documented in
//! `evkit-core`.

pub mod observable_collection;
pub mod observable_object;
pub mod property;

pub use observable_collection::{
    ChangeKind, CollectionChangedArgs, CollectionChangingArgs, ObservableCollection,
};
pub use observable_object::{ObservableObject, PropertyChangedArgs, PropertyChangingArgs};
pub use property::{Property, ReadonlyProperty};

pub use evkit_core::{Event, ScopedSubscription, Subscription};
