//! Integration tests for object lifecycles shared across threads.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

use glint_core::{Object, ObjectBase, Signal};

struct Ticker {
    base: ObjectBase,
    ticks: AtomicU32,
    ticked: Signal<u32>,
}

impl Ticker {
    fn new(name: &str) -> Self {
        Self {
            base: ObjectBase::with_name(name),
            ticks: AtomicU32::new(0),
            ticked: Signal::new(),
        }
    }
}

impl Object for Ticker {
    fn object_base(&self) -> &ObjectBase {
        &self.base
    }

    fn update(&self, _delta_time: f32) -> bool {
        if !self.base.update() {
            return false;
        }
        let n = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        self.ticked.emit(n);
        true
    }
}

#[test]
fn test_setters_from_another_thread_are_observed() {
    let ticker = Arc::new(Ticker::new("ticker"));
    ticker.init();

    let remote = ticker.clone();
    thread::spawn(move || {
        remote.object_base().set_enabled(false);
        remote.object_base().set_name("renamed");
    })
    .join()
    .unwrap();

    assert!(!ticker.update(0.016));
    assert_eq!(&*ticker.name(), "renamed");

    ticker.object_base().set_enabled(true);
    assert!(ticker.update(0.016));
}

#[test]
fn test_handlers_fire_within_update() {
    let ticker = Ticker::new("ticker");
    let seen = Arc::new(AtomicU32::new(0));

    let seen_clone = seen.clone();
    ticker.ticked.connect(move |&n| {
        seen_clone.store(n, Ordering::SeqCst);
    });

    ticker.init();
    ticker.update(0.016);
    ticker.update(0.016);
    assert_eq!(seen.load(Ordering::SeqCst), 2);

    // Closing is idempotent and silences further updates.
    ticker.close();
    ticker.close();
    assert!(!ticker.update(0.016));
    assert_eq!(seen.load(Ordering::SeqCst), 2);
}
