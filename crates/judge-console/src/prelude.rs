//! Prelude module for judge-console.
//!
//! ```ignore
//! use judge_console::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal/slot and property primitives (`Signal`, `Property`)
//! - The list controller and its request/state types
//! - Pagination views
//! - REST client and session types
//! - Configuration and errors

// ============================================================================
// Signal/Slot and Property System
// ============================================================================

pub use crate::{ConnectionId, Property, Signal};

// ============================================================================
// Lists
// ============================================================================

pub use crate::list::{
    ListController, ListFilters, ListOptions, ListRequest, ListResponse, ListSource, ListState,
    SortField, SortOrder,
};
pub use crate::pagination::{PageItem, PaginationView, Paginator};

// ============================================================================
// Networking
// ============================================================================

pub use crate::net::{MemorySession, NetworkError, PageMeta, RestApiClient, SessionStore};

// ============================================================================
// Configuration and Errors
// ============================================================================

pub use crate::config::ConsoleConfig;
pub use crate::error::{ConfigError, ControllerError, FilterError};
pub use crate::metadata::{MetadataCache, MetadataSnapshot};
