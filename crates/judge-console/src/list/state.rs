//! Observable list state.

use judge_console_net::{ListPayload, PageMeta};

/// One page of items as returned by a [`ListSource`](super::ListSource).
#[derive(Clone, Debug, PartialEq)]
pub struct ListResponse<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}

impl<T> From<ListPayload<T>> for ListResponse<T> {
    fn from(payload: ListPayload<T>) -> Self {
        Self {
            items: payload.data,
            meta: payload.meta,
        }
    }
}

/// What a list view renders.
///
/// `items` and `meta` always come from the most recent successful fetch, so a
/// failed refresh leaves the previous page on screen next to the error.
#[derive(Clone, Debug, PartialEq)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub meta: Option<PageMeta>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl<T> ListState<T> {
    /// Whether any fetch has succeeded yet.
    pub fn has_data(&self) -> bool {
        self.meta.is_some()
    }

    /// Whether the last completed fetch failed.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    pub(crate) fn begin_fetch(&mut self) {
        self.is_loading = true;
        self.error = None;
    }

    pub(crate) fn finish_success(&mut self, response: ListResponse<T>) {
        self.items = response.items;
        self.meta = Some(response.meta);
        self.is_loading = false;
        self.error = None;
    }

    pub(crate) fn finish_failure(&mut self, message: &str) {
        self.is_loading = false;
        self.error = Some(message.to_string());
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            meta: None,
            is_loading: false,
            error: None,
        }
    }
}
