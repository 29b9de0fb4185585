//! HTTP client for judge-console.
//!
//! [`HttpClient`] wraps a pooled `reqwest` client with the console's default
//! timeouts; [`RestApiClient`] layers base URL handling, session auth and
//! envelope decoding on top.

mod client;
mod request;
mod response;
mod rest_api;

pub use client::{
    DEFAULT_REDIRECT_LIMIT, DEFAULT_TIMEOUT, HttpClient, HttpClientBuilder, HttpClientConfig,
};
pub use request::{HttpMethod, HttpRequest, RequestBody};
pub use response::HttpResponse;
pub use rest_api::{
    ApiAuth, RequestHook, ResponseHook, RestApiClient, RestApiClientBuilder, RestApiRequestBuilder,
};
