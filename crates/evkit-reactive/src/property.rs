#![forbid(unsafe_code)]

//! Value wrappers unifying custom accessor logic with plain-value syntax.
//!
//! [`Property<T>`] encapsulates a value behind `get`/`set`, with three
//! interchangeable backings:
//!
//! - a private backing value (`Property::new`, `From<T>`),
//! - caller-supplied getter/setter closures (`Property::with_accessors`) for
//!   validation, clamping, transformation, or computed/dependent values,
//! - a private backing value threaded through caller closures
//!   (`Property::with_storage`), so accessors keep custom logic without
//!   capturing external state.
//!
//! [`ReadonlyProperty<T>`] is the getter-only counterpart.
//!
//! This layer is pure value-wrapper logic: no locks, no `Send` bounds, no
//! dependency on the event core. Accessor closures run on the caller's
//! thread, and mutation goes through `&mut self`.

use std::fmt;

type Getter<T> = Box<dyn Fn() -> T>;
type Setter<T> = Box<dyn FnMut(T)>;
type StoredGetter<T> = Box<dyn Fn(&T) -> T>;
type StoredSetter<T> = Box<dyn FnMut(T, &mut T)>;

enum Backing<T> {
    Value(T),
    Accessors { get: Getter<T>, set: Setter<T> },
    Stored {
        value: T,
        get: StoredGetter<T>,
        set: StoredSetter<T>,
    },
}

/// A value with pluggable accessor logic and value-like ergonomics.
///
/// ```
/// use evkit_reactive::Property;
///
/// // Plain backing value.
/// let mut age = Property::new(25);
/// age.set(26);
/// assert_eq!(age.get(), 26);
/// assert!(age == 26);
///
/// // Clamping setter over private storage.
/// let mut score = Property::with_storage(
///     50,
///     |stored: &i32| *stored,
///     |new, stored| *stored = new.clamp(0, 100),
/// );
/// score.set(150);
/// assert_eq!(score.get(), 100);
/// ```
pub struct Property<T> {
    backing: Backing<T>,
}

impl<T: Clone> Property<T> {
    /// A property backed by a private value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            backing: Backing::Value(value),
        }
    }

    /// A property backed entirely by caller-supplied accessors.
    ///
    /// The getter is consulted on every [`get`](Property::get); the setter
    /// receives the incoming value and decides what to do with it (store,
    /// reject, clamp, forward).
    #[must_use]
    pub fn with_accessors(
        get: impl Fn() -> T + 'static,
        set: impl FnMut(T) + 'static,
    ) -> Self {
        Self {
            backing: Backing::Accessors {
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    /// A property with private storage threaded through caller accessors.
    ///
    /// `get` receives the stored value; `set` receives the incoming value
    /// and a mutable reference to the storage.
    #[must_use]
    pub fn with_storage(
        initial: T,
        get: impl Fn(&T) -> T + 'static,
        set: impl FnMut(T, &mut T) + 'static,
    ) -> Self {
        Self {
            backing: Backing::Stored {
                value: initial,
                get: Box::new(get),
                set: Box::new(set),
            },
        }
    }

    /// Current value of the property.
    #[must_use]
    pub fn get(&self) -> T {
        match &self.backing {
            Backing::Value(value) => value.clone(),
            Backing::Accessors { get, .. } => get(),
            Backing::Stored { value, get, .. } => get(value),
        }
    }

    /// Update the property through its setter logic.
    pub fn set(&mut self, value: T) {
        match &mut self.backing {
            Backing::Value(slot) => *slot = value,
            Backing::Accessors { set, .. } => set(value),
            Backing::Stored { value: slot, set, .. } => set(value, slot),
        }
    }
}

impl<T: Clone> From<T> for Property<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone + PartialEq> PartialEq<T> for Property<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Clone + fmt::Display> fmt::Display for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&self.get()).finish()
    }
}

enum ReadBacking<T> {
    Value(T),
    Getter(Getter<T>),
}

/// Getter-only counterpart of [`Property`], for computed read-only values.
///
/// ```
/// use evkit_reactive::ReadonlyProperty;
///
/// let item_count = ReadonlyProperty::computed(|| 3usize);
/// assert_eq!(item_count.get(), 3);
/// ```
pub struct ReadonlyProperty<T> {
    backing: ReadBacking<T>,
}

impl<T: Clone> ReadonlyProperty<T> {
    /// A read-only property backed by a fixed value.
    #[must_use]
    pub fn new(value: T) -> Self {
        Self {
            backing: ReadBacking::Value(value),
        }
    }

    /// A read-only property backed by a getter.
    #[must_use]
    pub fn computed(get: impl Fn() -> T + 'static) -> Self {
        Self {
            backing: ReadBacking::Getter(Box::new(get)),
        }
    }

    /// Current value of the property.
    #[must_use]
    pub fn get(&self) -> T {
        match &self.backing {
            ReadBacking::Value(value) => value.clone(),
            ReadBacking::Getter(get) => get(),
        }
    }
}

impl<T: Clone> From<T> for ReadonlyProperty<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: Clone + PartialEq> PartialEq<T> for ReadonlyProperty<T> {
    fn eq(&self, other: &T) -> bool {
        self.get() == *other
    }
}

impl<T: Clone + fmt::Display> fmt::Display for ReadonlyProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for ReadonlyProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ReadonlyProperty").field(&self.get()).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
