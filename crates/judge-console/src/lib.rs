//! judge-console - list controllers for an online-judge admin console.
//!
//! This is the umbrella crate. It re-exports the core primitives and the
//! networking crate, and provides:
//!
//! - [`list`]: the generic [`ListController`] behind every admin table
//! - [`resources`]: contests, problems, submissions, tags, topics and users
//! - [`pagination`]: page strip computation for table footers
//! - [`metadata`]: the shared tag/topic/language cache
//! - [`config`]: TOML configuration
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use judge_console::prelude::*;
//! use judge_console::resources::{ContestFilters, ContestStatus, Contests, Resource};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConsoleConfig::load("console.toml")?;
//! let session = Arc::new(MemorySession::with_token("jwt-from-login"));
//! let client = config.rest_client(session)?;
//!
//! let contests = Contests::controller(client, config.list_options())?;
//! contests.set_filters(ContestFilters {
//!     status: Some(ContestStatus::Running),
//!     ..Default::default()
//! })?;
//! contests.wait_until_idle().await;
//!
//! let state = contests.state();
//! println!("{} running contests", state.items.len());
//! # Ok(())
//! # }
//! ```

pub use judge_console_core::*;

/// Networking: HTTP and REST clients, envelopes, sessions.
pub mod net {
    pub use judge_console_net::*;
}

pub mod config;
mod error;
pub mod list;
pub mod metadata;
pub mod pagination;
pub mod prelude;
pub mod resources;

pub use config::ConsoleConfig;
pub use error::{ConfigError, ConfigResult, ControllerError, FilterError};
pub use list::{ListController, ListOptions, ListRequest, ListSource, ListState, SortOrder};
pub use metadata::{MetadataCache, MetadataSnapshot};
pub use pagination::{PageItem, PaginationView, Paginator};
