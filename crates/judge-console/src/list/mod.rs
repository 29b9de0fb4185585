//! Remote list controllers.
//!
//! Every list screen in the console follows the same pattern: a page of items
//! fetched from the backend, driven by pagination, filters, sort and a
//! debounced keyword search. This module provides that pattern once:
//!
//! - [`ListRequest`]: the value-compared request snapshot and its wire forms
//! - [`ListSource`]: how a resource turns a request into a page of items
//! - [`ListController`]: the state machine tying them together
//! - [`ListState`]: what a view renders

mod controller;
mod request;
mod source;
mod state;

pub use controller::{DEFAULT_PAGE_SIZE, ListController, ListOptions};
pub use request::{ListFilters, ListRequest, SortField, SortOrder};
pub use source::{ListSource, SourceRequest};
pub use state::{ListResponse, ListState};
