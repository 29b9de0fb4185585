//! Networking for judge-console.
//!
//! This crate talks to the judge backend:
//!
//! - **HTTP Client**: `reqwest`-based client with a 5 s default timeout
//! - **REST Client**: base URL joining, bearer auth from a [`SessionStore`],
//!   request and response hooks
//! - **Envelopes**: decoding of `{ "data": ... }` bodies and paginated
//!   `{ "data": { "data": [...], "meta": {...} } }` list payloads
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use judge_console_net::{MemorySession, RestApiClient};
//!
//! let session = Arc::new(MemorySession::new());
//! let client = RestApiClient::builder("https://judge.example.com/api")
//!     .session(session.clone())
//!     .json_api()
//!     .build()?;
//!
//! session.sign_in("jwt-from-login");
//! let languages: Vec<Language> = client.get("/languages").envelope().await?;
//! ```

pub mod envelope;
mod error;
pub mod http;
pub mod session;

pub use envelope::{ApiEnvelope, ListPayload, PageMeta};
pub use error::{NetworkError, Result};
pub use http::{
    ApiAuth, HttpClient, HttpClientBuilder, HttpClientConfig, HttpMethod, HttpRequest,
    HttpResponse, RequestBody, RestApiClient, RestApiClientBuilder, RestApiRequestBuilder,
};
pub use session::{MemorySession, SessionStore};
