//! Core systems for judge-console.
//!
//! This crate provides the reactive primitives the list controllers are built
//! from:
//!
//! - **Signal/Slot System**: Type-safe change notification
//! - **Property System**: Values with change detection
//! - **Debouncer**: Cancellable delayed tasks on the tokio runtime
//! - **Logging**: `tracing` target names shared by the workspace
//!
//! # Example
//!
//! ```
//! use judge_console_core::{Property, Signal};
//!
//! let keyword = Property::new(String::new());
//! let keyword_changed = Signal::<String>::new();
//!
//! keyword_changed.connect(|text| println!("typed: {text}"));
//!
//! let text = "two sum".to_string();
//! if keyword.set(text.clone()) {
//!     keyword_changed.emit(text);
//! }
//! ```

pub mod debounce;
mod error;
pub mod logging;
pub mod property;
pub mod signal;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{CoreError, Result};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
