//! The seam between a list controller and the backend.

use std::fmt;
use std::future::Future;

use super::request::{ListFilters, ListRequest, SortField, SortOrder};
use super::state::ListResponse;

/// Request type used by a source.
pub type SourceRequest<S> = ListRequest<<S as ListSource>::Filters, <S as ListSource>::SortField>;

/// A paginated, filterable, sortable collection on the backend.
///
/// Implementations describe one resource: its item type, filter shape, sort
/// columns and how a [`ListRequest`] is turned into a round trip.
pub trait ListSource: Send + Sync + 'static {
    type Item: Clone + fmt::Debug + Send + Sync + 'static;
    type Filters: ListFilters;
    type SortField: SortField;
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short resource name used in log events.
    fn name(&self) -> &'static str;

    /// Sort applied to a fresh or reset list.
    fn default_sort(&self) -> (Self::SortField, SortOrder);

    /// The message shown when a fetch fails. Transport details are logged,
    /// never shown.
    fn error_message(&self) -> &'static str;

    /// Load one page.
    fn fetch(
        &self,
        request: &ListRequest<Self::Filters, Self::SortField>,
    ) -> impl Future<Output = Result<ListResponse<Self::Item>, Self::Error>> + Send;
}
