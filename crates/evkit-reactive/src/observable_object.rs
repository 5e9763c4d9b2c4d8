#![forbid(unsafe_code)]

//! Before/after change notification for named properties.
//!
//! [`ObservableObject`] is a composable notifier: embed one in a model
//! struct and route field mutations through
//! [`set_property_value`](ObservableObject::set_property_value). Observers
//! subscribe to the `property_changing` event (raised before a mutation)
//! and the `property_changed` event (raised after it); both deliver a
//! record naming the property.
//!
//! # Invariants
//!
//! 1. Assigning a value equal to the current one raises no events and
//!    reports no change.
//! 2. For a real change, `changing` fires before the field is written and
//!    `changed` fires after, on the mutating thread.
//! 3. Notifications carry the args record only; handlers that need the
//!    object capture their own handle.
//!
//! ```
//! use evkit_reactive::ObservableObject;
//!
//! struct Person {
//!     object: ObservableObject,
//!     age: i32,
//! }
//!
//! impl Person {
//!     fn set_age(&mut self, age: i32) -> bool {
//!         self.object.set_property_value(&mut self.age, age, "age")
//!     }
//! }
//!
//! let mut person = Person { object: ObservableObject::new(), age: 25 };
//! let _sub = person.object.property_changed().subscribe(|args| {
//!     assert_eq!(args.property, "age");
//! });
//! assert!(person.set_age(30));
//! assert!(!person.set_age(30));
//! ```

use evkit_core::Event;
use tracing::trace;

/// Raised before a property mutates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyChangingArgs {
    /// Name of the property about to change.
    pub property: &'static str,
}

impl PropertyChangingArgs {
    /// Create args for `property`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self { property }
    }
}

/// Raised after a property mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PropertyChangedArgs {
    /// Name of the property that changed.
    pub property: &'static str,
}

impl PropertyChangedArgs {
    /// Create args for `property`.
    #[must_use]
    pub const fn new(property: &'static str) -> Self {
        Self { property }
    }
}

/// Composable change notifier for model structs.
#[derive(Debug, Default)]
pub struct ObservableObject {
    property_changing: Event<PropertyChangingArgs>,
    property_changed: Event<PropertyChangedArgs>,
}

impl ObservableObject {
    /// Create a notifier with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Event raised before any property mutation.
    #[must_use]
    pub fn property_changing(&self) -> &Event<PropertyChangingArgs> {
        &self.property_changing
    }

    /// Event raised after any property mutation.
    #[must_use]
    pub fn property_changed(&self) -> &Event<PropertyChangedArgs> {
        &self.property_changed
    }

    /// Raise `property_changing` for `property` directly.
    ///
    /// For custom setters that manage their own storage; prefer
    /// [`set_property_value`](Self::set_property_value) where a plain field
    /// assignment suffices.
    pub fn notify_property_changing(&self, property: &'static str) {
        self.property_changing
            .notify(&PropertyChangingArgs::new(property));
    }

    /// Raise `property_changed` for `property` directly.
    pub fn notify_property_changed(&self, property: &'static str) {
        self.property_changed
            .notify(&PropertyChangedArgs::new(property));
    }

    /// Assign `value` to `field` with change detection and notification.
    ///
    /// Returns `false` without raising anything when the values compare
    /// equal. Otherwise raises `changing`, writes the field, raises
    /// `changed`, and returns `true`.
    pub fn set_property_value<T: PartialEq>(
        &self,
        field: &mut T,
        value: T,
        property: &'static str,
    ) -> bool {
        if *field == value {
            return false;
        }
        trace!(property, "property changing");
        self.notify_property_changing(property);
        *field = value;
        self.notify_property_changed(property);
        true
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
