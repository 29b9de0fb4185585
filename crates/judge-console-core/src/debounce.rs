//! Debounced one-shot tasks.
//!
//! A [`Debouncer`] holds at most one pending delayed task. Scheduling a new
//! task aborts the pending one and restarts the delay, so a burst of calls
//! closer together than the delay results in a single execution of the last
//! scheduled closure.
//!
//! ```no_run
//! use std::time::Duration;
//! use judge_console_core::Debouncer;
//!
//! # async fn demo() -> Result<(), judge_console_core::CoreError> {
//! let debouncer = Debouncer::new(Duration::from_millis(500))?;
//!
//! for text in ["a", "ab", "abc"] {
//!     let text = text.to_string();
//!     debouncer.schedule(move || println!("search for {text}"));
//! }
//! // Only "search for abc" is printed, 500 ms after the last call.
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::{CoreError, Result};
use crate::logging::targets;

/// Default debounce window used by list search inputs.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Runs the most recently scheduled closure once the delay elapses without
/// another call to [`schedule`](Self::schedule).
pub struct Debouncer {
    delay: Duration,
    runtime: Handle,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Create a debouncer bound to the current tokio runtime.
    ///
    /// Fails with [`CoreError::NoRuntime`] outside a runtime context.
    pub fn new(delay: Duration) -> Result<Self> {
        let runtime = Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        Ok(Self::with_handle(delay, runtime))
    }

    /// Create a debouncer that spawns its timers on the given runtime.
    pub fn with_handle(delay: Duration, runtime: Handle) -> Self {
        Self {
            delay,
            runtime,
            pending: Mutex::new(None),
        }
    }

    /// The configured delay.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Schedule `task` to run after the delay, replacing any pending task.
    pub fn schedule<F>(&self, task: F)
    where
        F: FnOnce() + Send + 'static,
    {
        let delay = self.delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });

        if let Some(previous) = self.pending.lock().replace(handle) {
            if !previous.is_finished() {
                tracing::trace!(target: targets::DEBOUNCE, "restarting debounce window");
            }
            previous.abort();
        }
    }

    /// Abort the pending task, if any.
    ///
    /// Returns `true` if a task was waiting and has been cancelled.
    pub fn cancel(&self) -> bool {
        match self.pending.lock().take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                tracing::trace!(target: targets::DEBOUNCE, "cancelled pending debounce");
                true
            }
            _ => false,
        }
    }

    /// Check whether a scheduled task has not run yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}

impl std::fmt::Debug for Debouncer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Debouncer")
            .field("delay", &self.delay)
            .field("pending", &self.is_pending())
            .finish()
    }
}
