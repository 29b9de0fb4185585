//! Signals, properties and debouncing working together.

use std::sync::Arc;
use std::time::Duration;

use judge_console_core::{Debouncer, Property, Signal};
use parking_lot::Mutex;

struct SearchBox {
    text: Property<String>,
    applied: Signal<String>,
    debouncer: Debouncer,
}

impl SearchBox {
    fn new(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            text: Property::default(),
            applied: Signal::new(),
            debouncer: Debouncer::new(delay).unwrap(),
        })
    }

    fn type_text(self: &Arc<Self>, text: &str) {
        self.text.set(text.to_string());
        let this = Arc::downgrade(self);
        self.debouncer.schedule(move || {
            if let Some(this) = this.upgrade() {
                this.applied.emit(this.text.get());
            }
        });
    }
}

#[tokio::test(start_paused = true)]
async fn test_debounced_signal_emits_latest_value() {
    let search = SearchBox::new(Duration::from_millis(500));
    let applied = Arc::new(Mutex::new(Vec::new()));
    let sink = applied.clone();
    search.applied.connect(move |text| sink.lock().push(text.clone()));

    for text in ["s", "se", "seg"] {
        search.type_text(text);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(Duration::from_millis(600)).await;

    assert_eq!(*applied.lock(), vec!["seg"]);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_owner_cancels_pending_task() {
    let applied = Arc::new(Mutex::new(0));
    {
        let search = SearchBox::new(Duration::from_millis(100));
        let sink = applied.clone();
        search.applied.connect(move |_| *sink.lock() += 1);
        search.type_text("gone");
    }
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(*applied.lock(), 0);
}

#[test]
fn test_property_update_drives_signal_once() {
    let page = Property::new(1u32);
    let changed = Signal::<u32>::new();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    changed.connect(move |&p| sink.lock().push(p));

    for next in [1, 2, 2, 3] {
        if let Some(value) = page.update(|_| next) {
            changed.emit(value);
        }
    }

    assert_eq!(*seen.lock(), vec![2, 3]);
}
