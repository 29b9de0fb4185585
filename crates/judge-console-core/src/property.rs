//! Values that report whether a write changed them.
//!
//! List controllers keep their canonical request in a [`Property`] and only
//! fetch when a write actually produced a different request.
//!
//! ```
//! use judge_console_core::{Property, Signal};
//!
//! let page = Property::new(1u32);
//! let page_changed = Signal::<u32>::new();
//!
//! if page.set(2) {
//!     page_changed.emit(2);
//! }
//! assert!(!page.set(2));
//! assert_eq!(page.get(), 2);
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A lock-protected value with change detection on every write.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// A copy of the current value.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Borrow the current value for the duration of `read`.
    pub fn with<R>(&self, read: impl FnOnce(&T) -> R) -> R {
        read(&self.value.read())
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Store `value`. Returns `false` when it equals what was already there.
    pub fn set(&self, value: T) -> bool {
        self.update(|_| value).is_some()
    }

    /// Compute the next value from the current one while holding the write
    /// lock, so two updates never observe the same starting value.
    ///
    /// Returns the stored value when it changed.
    pub fn update(&self, next: impl FnOnce(&T) -> T) -> Option<T> {
        let mut slot = self.value.write();
        let candidate = next(&slot);
        if candidate == *slot {
            return None;
        }
        *slot = candidate;
        Some(slot.clone())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Property").field(&*self.value.read()).finish()
    }
}
