//! Response envelopes of the judge backend.
//!
//! Every endpoint wraps its payload in an object with a `data` field. List
//! endpoints nest once more, so the HTTP body looks like
//!
//! ```json
//! {
//!   "statusCode": 200,
//!   "message": "OK",
//!   "data": {
//!     "data": [ { "id": 1 }, { "id": 2 } ],
//!     "meta": {
//!       "page": 1, "limit": 10, "total": 2, "totalPages": 1,
//!       "hasNextPage": false, "hasPreviousPage": false
//!     }
//!   }
//! }
//! ```
//!
//! Seen through a JavaScript client whose response object wraps the body in
//! yet another `data`, that is the familiar `response.data.data.data`.

use serde::{Deserialize, Serialize};

/// The outer object every endpoint responds with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    /// The payload.
    pub data: T,
    /// Human-readable status message, when the backend sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Status code echoed in the body, when the backend sends one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

impl<T> ApiEnvelope<T> {
    /// Wrap a payload without message or status.
    pub fn new(data: T) -> Self {
        Self {
            data,
            message: None,
            status_code: None,
        }
    }

    /// Discard the envelope and keep the payload.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// The payload of a paginated list endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListPayload<T> {
    /// The items of the requested page.
    pub data: Vec<T>,
    /// Pagination metadata.
    pub meta: PageMeta,
}

/// Pagination metadata returned alongside a page of items.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// The 1-based page that was returned.
    pub page: u32,
    /// Page size used by the backend.
    pub limit: u32,
    /// Total number of matching items.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
    /// Whether a page after this one exists.
    pub has_next_page: bool,
    /// Whether a page before this one exists.
    pub has_previous_page: bool,
}

impl PageMeta {
    /// Metadata of an empty result.
    pub fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            total_pages: 0,
            has_next_page: false,
            has_previous_page: false,
        }
    }

    /// The 1-based index range of items on this page, or `None` when the
    /// page is past the end of the result.
    pub fn item_range(&self) -> Option<(u64, u64)> {
        if self.total == 0 || self.page == 0 {
            return None;
        }
        let first = (u64::from(self.page) - 1) * u64::from(self.limit) + 1;
        if first > self.total {
            return None;
        }
        let last = (first + u64::from(self.limit) - 1).min(self.total);
        Some((first, last))
    }
}
