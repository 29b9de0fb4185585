//! Logging facilities for judge-console.
//!
//! All crates in the workspace emit `tracing` events with one of the target
//! names below, so a subscriber can filter by subsystem:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("judge_console::list=debug,judge_console_net=warn")
//!     .init();
//! ```
//!
//! Installing a subscriber is left to the embedding application.

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "judge_console_core::signal";
    /// Debounced task target.
    pub const DEBOUNCE: &str = "judge_console_core::debounce";
    /// HTTP client target.
    pub const HTTP: &str = "judge_console_net::http";
    /// REST API client target.
    pub const REST_API: &str = "judge_console_net::rest_api";
    /// List controller target.
    pub const LIST: &str = "judge_console::list";
    /// Metadata cache target.
    pub const METADATA: &str = "judge_console::metadata";
    /// Configuration loading target.
    pub const CONFIG: &str = "judge_console::config";
}

/// Span names used for request tracing.
pub mod span_names {
    /// One list fetch, from issue to settle.
    pub const LIST_FETCH: &str = "judge_console::list_fetch";
    /// One REST round trip.
    pub const REST_REQUEST: &str = "judge_console_net::request";
}
