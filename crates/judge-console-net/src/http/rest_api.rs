//! REST client for the judge backend.
//!
//! [`RestApiClient`] joins request paths onto a base URL, attaches the
//! session's bearer token to every request, and decodes the backend's
//! response envelopes.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use judge_console_net::{MemorySession, RestApiClient};
//!
//! let session = Arc::new(MemorySession::with_token("jwt"));
//! let client = RestApiClient::builder("https://judge.example.com/api")
//!     .session(session)
//!     .json_api()
//!     .build()?;
//!
//! // GET /contests?page=1&limit=10, decoded from {"data": {"data": [...], "meta": {...}}}
//! let page: ListPayload<Contest> = client
//!     .get("/contests")
//!     .query("page", "1")
//!     .query("limit", "10")
//!     .list()
//!     .await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use judge_console_core::logging::{span_names, targets};
use serde::{Serialize, de::DeserializeOwned};
use tracing::Instrument;

use super::client::{HttpClient, HttpClientBuilder};
use super::request::{HttpMethod, HttpRequest, RequestBody};
use super::response::HttpResponse;
use crate::envelope::{ApiEnvelope, ListPayload};
use crate::error::{NetworkError, Result};
use crate::session::SessionStore;

/// Where a client's bearer token comes from.
#[derive(Clone)]
pub enum ApiAuth {
    /// The same token on every request.
    Static(String),
    /// Whatever the store holds when the request is built.
    Session(Arc<dyn SessionStore>),
}

impl ApiAuth {
    fn token(&self) -> Option<String> {
        match self {
            ApiAuth::Static(token) => Some(token.clone()),
            ApiAuth::Session(store) => store.access_token(),
        }
    }
}

impl std::fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuth::Static(_) => f.write_str("Static(<redacted>)"),
            ApiAuth::Session(_) => f.write_str("Session"),
        }
    }
}

/// Called on every request just before it is sent.
pub type RequestHook = Arc<dyn Fn(&mut HttpRequest) + Send + Sync>;

/// Called on every response before its status is checked. An error fails
/// the request.
pub type ResponseHook = Arc<dyn Fn(&HttpResponse) -> Result<()> + Send + Sync>;

#[derive(Clone, Default)]
struct Hooks {
    request: Vec<RequestHook>,
    response: Vec<ResponseHook>,
}

fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    Ok((HeaderName::from_bytes(name.as_bytes())?, HeaderValue::from_str(value)?))
}

pub struct RestApiClientBuilder {
    base_url: String,
    http: Option<HttpClient>,
    http_builder: HttpClientBuilder,
    headers: HeaderMap,
    header_error: Option<NetworkError>,
    auth: Option<ApiAuth>,
    hooks: Hooks,
}

impl RestApiClientBuilder {
    /// Start a client for `base_url`; a trailing `/` is ignored.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: None,
            http_builder: HttpClientBuilder::new(),
            headers: HeaderMap::new(),
            header_error: None,
            auth: None,
            hooks: Hooks::default(),
        }
    }

    /// Share an existing connection pool.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http = Some(client);
        self
    }

    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.http_builder = builder;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.http_builder = self.http_builder.timeout(timeout);
        self
    }

    /// A header sent with every request. Invalid headers fail [`build`](Self::build).
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        match parse_header(name, value) {
            Ok((name, value)) => {
                self.headers.insert(name, value);
            }
            Err(err) => {
                self.header_error.get_or_insert(err);
            }
        }
        self
    }

    /// Send and accept `application/json`.
    pub fn json_api(self) -> Self {
        self.default_header("accept", "application/json")
            .default_header("content-type", "application/json")
    }

    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.auth(ApiAuth::Static(token.into()))
    }

    /// Read the bearer token from `store` on every request. Requests made
    /// while the store is empty go out unauthenticated.
    pub fn session(self, store: Arc<dyn SessionStore>) -> Self {
        self.auth(ApiAuth::Session(store))
    }

    pub fn auth(mut self, auth: ApiAuth) -> Self {
        self.auth = Some(auth);
        self
    }

    pub fn on_request<F>(mut self, hook: F) -> Self
    where
        F: Fn(&mut HttpRequest) + Send + Sync + 'static,
    {
        self.hooks.request.push(Arc::new(hook));
        self
    }

    pub fn on_response<F>(mut self, hook: F) -> Self
    where
        F: Fn(&HttpResponse) -> Result<()> + Send + Sync + 'static,
    {
        self.hooks.response.push(Arc::new(hook));
        self
    }

    pub fn build(self) -> Result<RestApiClient> {
        if let Some(err) = self.header_error {
            return Err(err);
        }

        let base_url = self.base_url.trim_end_matches('/').to_string();
        url::Url::parse(&base_url)?;

        let http = match self.http {
            Some(client) => client,
            None => self.http_builder.build()?,
        };

        Ok(RestApiClient {
            shared: Arc::new(Shared {
                http,
                base_url,
                headers: self.headers,
                auth: self.auth,
                hooks: self.hooks,
            }),
        })
    }
}

struct Shared {
    http: HttpClient,
    base_url: String,
    headers: HeaderMap,
    auth: Option<ApiAuth>,
    hooks: Hooks,
}

/// Client for one backend. Clones share the pool, auth and hooks.
#[derive(Clone)]
pub struct RestApiClient {
    shared: Arc<Shared>,
}

impl RestApiClient {
    pub fn builder(base_url: impl Into<String>) -> RestApiClientBuilder {
        RestApiClientBuilder::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.shared.base_url
    }

    pub fn http_client(&self) -> &HttpClient {
        &self.shared.http
    }

    /// Absolute URL for a path, with or without a leading `/`.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.shared.base_url, path.trim_start_matches('/'))
    }

    pub fn get(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Get, path)
    }

    pub fn post(&self, path: &str) -> RestApiRequestBuilder {
        self.request(HttpMethod::Post, path)
    }

    pub fn request(&self, method: HttpMethod, path: &str) -> RestApiRequestBuilder {
        let mut request = HttpRequest::new(method, self.url_for(path));
        request.headers = self.shared.headers.clone();

        RestApiRequestBuilder {
            client: self.clone(),
            request,
            error: None,
            auth: None,
        }
    }
}

impl std::fmt::Debug for RestApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiClient")
            .field("base_url", &self.shared.base_url)
            .field("auth", &self.shared.auth)
            .finish()
    }
}

/// One request under construction.
///
/// Errors from `header` and `json` are held until the request is sent.
pub struct RestApiRequestBuilder {
    client: RestApiClient,
    request: HttpRequest,
    error: Option<NetworkError>,
    auth: Option<ApiAuth>,
}

impl RestApiRequestBuilder {
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match parse_header(name, value) {
            Ok((name, value)) => {
                self.request.headers.insert(name, value);
            }
            Err(err) => {
                self.error.get_or_insert(err);
            }
        }
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    pub fn query_pairs(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.request.query.extend(pairs);
        self
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.request.body = RequestBody::Json(value),
            Err(err) => {
                tracing::error!(target: targets::REST_API, error = %err, "failed to encode request body");
                self.error.get_or_insert(err.into());
            }
        }
        self
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.request.body = RequestBody::Text(body.into());
        self
    }

    /// Use `token` instead of the client's auth for this request.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(ApiAuth::Static(token.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    /// The request as it would be sent now.
    ///
    /// Session tokens are read here, so the request carries whatever token
    /// the store holds at this moment.
    pub fn build(&self) -> HttpRequest {
        let mut request = self.request.clone();
        request.bearer_token = self
            .auth
            .as_ref()
            .or(self.client.shared.auth.as_ref())
            .and_then(ApiAuth::token);
        request
    }

    /// Send the request and return the response, whatever its status.
    pub async fn send(self) -> Result<HttpResponse> {
        let span = tracing::debug_span!(
            target: targets::REST_API,
            span_names::REST_REQUEST,
            method = %self.request.method,
            url = %self.request.url,
        );
        self.dispatch().instrument(span).await
    }

    async fn dispatch(self) -> Result<HttpResponse> {
        if let Some(err) = self.error.clone() {
            return Err(err);
        }

        let shared = Arc::clone(&self.client.shared);
        let mut request = self.build();
        for hook in &shared.hooks.request {
            hook(&mut request);
        }

        let response = shared.http.execute(request).await?;
        match response.status() {
            401 => tracing::warn!(
                target: targets::REST_API,
                "request rejected with 401; session token missing or expired"
            ),
            status if !response.is_success() => {
                tracing::debug!(target: targets::REST_API, status, "non-success response")
            }
            _ => {}
        }

        for hook in &shared.hooks.response {
            hook(&response)?;
        }
        Ok(response)
    }

    /// Send, fail on non-2xx, and decode the body as `T`.
    pub async fn fetch_json<T: DeserializeOwned>(self) -> Result<T> {
        self.send().await?.error_for_status().await?.json().await
    }

    /// Send and unwrap the `{ "data": ... }` envelope.
    pub async fn envelope<T: DeserializeOwned>(self) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.fetch_json().await?;
        Ok(envelope.into_inner())
    }

    /// Send and decode a paginated `{ "data": { "data": [...], "meta": {...} } }` body.
    pub async fn list<T: DeserializeOwned>(self) -> Result<ListPayload<T>> {
        self.envelope().await
    }
}
