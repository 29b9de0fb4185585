//! Backend list resources.
//!
//! Each submodule describes one admin list: its entity, filter set, sortable
//! columns and endpoint. [`RestListSource`] turns any [`Resource`] into a
//! [`ListSource`] backed by a [`RestApiClient`], so the six lists share one
//! controller implementation.

mod contests;
mod problems;
mod submissions;
mod tags;
mod topics;
mod users;

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use judge_console_net::{HttpMethod, NetworkError, RestApiClient};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ControllerError;
use crate::list::{
    ListController, ListFilters, ListOptions, ListRequest, ListResponse, ListSource, SortField,
    SortOrder,
};

pub use contests::{Contest, ContestFilters, ContestList, ContestSortField, ContestStatus, Contests};
pub use problems::{Difficulty, Problem, ProblemFilters, ProblemList, ProblemSortField, Problems};
pub use submissions::{
    DateRange, Submission, SubmissionFilters, SubmissionList, SubmissionSortField, Submissions,
    Verdict,
};
pub use tags::{Tag, TagList, TagSortField, Tags};
pub use topics::{Topic, TopicList, TopicSortField, Topics};
pub use users::{User, UserFilters, UserList, UserRole, UserSortField, Users};

/// Static description of a backend list endpoint.
pub trait Resource: Send + Sync + 'static {
    type Item: DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static;
    type Filters: ListFilters;
    type SortField: SortField;

    /// Short name used in log events.
    const NAME: &'static str;
    /// Path relative to the API base URL.
    const PATH: &'static str;
    /// GET sends the request as a query string, anything else as a JSON body.
    const METHOD: HttpMethod;
    const DEFAULT_SORT: (Self::SortField, SortOrder);
    /// Message shown to the user when a fetch fails.
    const ERROR_MESSAGE: &'static str;

    /// Create a controller for this resource.
    fn controller(
        client: RestApiClient,
        options: ListOptions,
    ) -> Result<ListController<RestListSource<Self>>, ControllerError>
    where
        Self: Sized,
    {
        ListController::new(RestListSource::new(client), options)
    }
}

/// A [`ListSource`] that fetches a [`Resource`] through a [`RestApiClient`].
pub struct RestListSource<R> {
    client: RestApiClient,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> RestListSource<R> {
    pub fn new(client: RestApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    pub fn client(&self) -> &RestApiClient {
        &self.client
    }
}

impl<R> Clone for RestListSource<R> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> fmt::Debug for RestListSource<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestListSource")
            .field("resource", &R::NAME)
            .field("method", &R::METHOD)
            .field("path", &R::PATH)
            .finish()
    }
}

impl<R: Resource> ListSource for RestListSource<R> {
    type Item = R::Item;
    type Filters = R::Filters;
    type SortField = R::SortField;
    type Error = NetworkError;

    fn name(&self) -> &'static str {
        R::NAME
    }

    fn default_sort(&self) -> (R::SortField, SortOrder) {
        R::DEFAULT_SORT
    }

    fn error_message(&self) -> &'static str {
        R::ERROR_MESSAGE
    }

    fn fetch(
        &self,
        request: &ListRequest<R::Filters, R::SortField>,
    ) -> impl Future<Output = Result<ListResponse<R::Item>, NetworkError>> + Send {
        let call = self.client.request(R::METHOD, R::PATH);
        let builder = if R::METHOD.carries_body() {
            request.to_json_body().map(|body| call.json(&body))
        } else {
            request.to_query_pairs().map(|pairs| call.query_pairs(pairs))
        };

        async move {
            let payload = builder?.list::<R::Item>().await?;
            Ok::<_, NetworkError>(ListResponse::from(payload))
        }
    }
}

/// Filter set for lists that only support keyword search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct NoFilters {}

impl ListFilters for NoFilters {}

/// Declare a resource's sortable columns together with their wire names.
macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// All columns in declaration order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
        }

        impl $crate::list::SortField for $name {
            fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::list::SortField::as_str(self))
            }
        }
    };
}

pub(crate) use sort_fields;
