//! End-to-end tests composing the reactive layers: an observable model
//! struct with properties, an observable collection, and observers wired
//! through the event core.

use evkit_reactive::{
    ChangeKind, ObservableCollection, ObservableObject, Property, ReadonlyProperty,
    ScopedSubscription,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

// ── a model struct built from the toolkit ───────────────────────────────

struct Playlist {
    object: ObservableObject,
    name: String,
    tracks: ObservableCollection<String>,
}

impl Playlist {
    fn new(name: &str) -> Self {
        Self {
            object: ObservableObject::new(),
            name: name.to_string(),
            tracks: ObservableCollection::new(),
        }
    }

    fn set_name(&mut self, name: String) -> bool {
        self.object.set_property_value(&mut self.name, name, "name")
    }

    fn track_count(&self) -> ReadonlyProperty<usize> {
        ReadonlyProperty::new(self.tracks.len())
    }
}

#[test]
fn property_and_collection_events_compose() {
    let mut playlist = Playlist::new("focus");
    let log = Arc::new(Mutex::new(Vec::new()));

    let log_prop = Arc::clone(&log);
    let _name_sub = playlist.object.property_changed().subscribe(move |args| {
        log_prop.lock().unwrap().push(format!("prop:{}", args.property));
    });

    let log_coll = Arc::clone(&log);
    let _track_sub = playlist.tracks.collection_changed().subscribe(move |args| {
        log_coll
            .lock()
            .unwrap()
            .push(format!("coll:{:?}:{}", args.kind, args.new_len));
    });

    assert!(playlist.set_name("deep focus".to_string()));
    playlist.tracks.push("weightless".to_string());
    playlist.tracks.push("avril 14th".to_string());
    playlist.tracks.remove(0);

    assert_eq!(
        *log.lock().unwrap(),
        vec!["prop:name", "coll:Add:1", "coll:Add:2", "coll:Remove:1"]
    );
    assert_eq!(playlist.track_count().get(), 1);
}

#[test]
fn unchanged_assignment_stays_silent_end_to_end() {
    let mut playlist = Playlist::new("focus");
    let hits = Arc::new(AtomicUsize::new(0));

    let hits_changing = Arc::clone(&hits);
    let _changing = playlist.object.property_changing().subscribe(move |_| {
        hits_changing.fetch_add(1, Ordering::Relaxed);
    });
    let hits_changed = Arc::clone(&hits);
    let _changed = playlist.object.property_changed().subscribe(move |_| {
        hits_changed.fetch_add(1, Ordering::Relaxed);
    });

    assert!(!playlist.set_name("focus".to_string()));
    assert_eq!(hits.load(Ordering::Relaxed), 0);

    assert!(playlist.set_name("flow".to_string()));
    assert_eq!(hits.load(Ordering::Relaxed), 2);
}

// ── scoped observers over model events ──────────────────────────────────

#[test]
fn scoped_observer_detaches_with_its_scope() {
    let mut playlist = Playlist::new("focus");
    let hits = Arc::new(AtomicUsize::new(0));

    {
        let hits = Arc::clone(&hits);
        let _scoped: ScopedSubscription =
            playlist.tracks.collection_changed().subscribe_scoped(move |_| {
                hits.fetch_add(1, Ordering::Relaxed);
            });
        playlist.tracks.push("one".to_string());
    }

    playlist.tracks.push("two".to_string());
    assert_eq!(hits.load(Ordering::Relaxed), 1);
}

#[test]
fn observer_tokens_survive_model_teardown() {
    let playlist = Playlist::new("focus");
    let mut sub = playlist.tracks.collection_changed().subscribe(|_| {});
    assert!(sub.is_valid());

    drop(playlist);

    assert!(!sub.is_valid());
    sub.unsubscribe();
}

// ── properties driving observable state ─────────────────────────────────

#[test]
fn accessor_property_with_notification() {
    // A volume property that clamps and notifies through an object.
    let object = Arc::new(ObservableObject::new());
    let stored = Arc::new(Mutex::new(50u8));

    let stored_get = Arc::clone(&stored);
    let stored_set = Arc::clone(&stored);
    let object_in = Arc::clone(&object);
    let mut volume = Property::with_accessors(
        move || *stored_get.lock().unwrap(),
        move |v: u8| {
            let clamped = v.min(100);
            let mut slot = stored_set.lock().unwrap();
            if *slot != clamped {
                object_in.notify_property_changing("volume");
                *slot = clamped;
                drop(slot);
                object_in.notify_property_changed("volume");
            }
        },
    );

    let changes = Arc::new(AtomicUsize::new(0));
    let changes_in = Arc::clone(&changes);
    let _sub = object.property_changed().subscribe(move |args| {
        assert_eq!(args.property, "volume");
        changes_in.fetch_add(1, Ordering::Relaxed);
    });

    volume.set(80);
    assert_eq!(volume.get(), 80);
    assert_eq!(changes.load(Ordering::Relaxed), 1);

    volume.set(200); // Clamped to 100: a real change.
    assert_eq!(volume.get(), 100);
    assert_eq!(changes.load(Ordering::Relaxed), 2);

    volume.set(100); // Already 100: silent.
    assert_eq!(changes.load(Ordering::Relaxed), 2);
}

#[test]
fn changing_sees_pre_state_and_changed_sees_post_state() {
    let mut items: ObservableCollection<i32> = ObservableCollection::new();
    let ordering = Arc::new(Mutex::new(Vec::new()));

    let ordering_changing = Arc::clone(&ordering);
    let _changing = items.collection_changing().subscribe(move |args| {
        ordering_changing
            .lock()
            .unwrap()
            .push((args.kind, args.old_len, "before"));
    });
    let ordering_changed = Arc::clone(&ordering);
    let _changed = items.collection_changed().subscribe(move |args| {
        ordering_changed
            .lock()
            .unwrap()
            .push((args.kind, args.new_len, "after"));
    });

    items.push(1);
    items.clear();

    assert_eq!(
        *ordering.lock().unwrap(),
        vec![
            (ChangeKind::Add, 0, "before"),
            (ChangeKind::Add, 1, "after"),
            (ChangeKind::Clear, 1, "before"),
            (ChangeKind::Clear, 0, "after"),
        ]
    );
}
