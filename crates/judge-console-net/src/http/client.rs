//! Pooled HTTP client with the console's timeout defaults.

use std::sync::Arc;
use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};
use judge_console_core::logging::targets;
use reqwest::redirect::Policy;

use super::request::{HttpRequest, RequestBody};
use super::response::HttpResponse;
use crate::error::Result;

/// Request timeout applied unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

/// Redirects followed before giving up.
pub const DEFAULT_REDIRECT_LIMIT: usize = 5;

/// Settings baked into an [`HttpClient`] at build time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpClientConfig {
    /// Whole-request timeout.
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Zero disables redirects.
    pub redirect_limit: usize,
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_TIMEOUT,
            redirect_limit: DEFAULT_REDIRECT_LIMIT,
            user_agent: concat!("judge-console/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
    headers: HeaderMap,
}

impl HttpClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: HttpClientConfig) -> Self {
        Self {
            config,
            headers: HeaderMap::new(),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Maximum redirects to follow; zero disables them.
    pub fn redirect_limit(mut self, limit: usize) -> Self {
        self.config.redirect_limit = limit;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// A header sent with every request.
    pub fn default_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn build(self) -> Result<HttpClient> {
        let redirect = match self.config.redirect_limit {
            0 => Policy::none(),
            limit => Policy::limited(limit),
        };

        let client = reqwest::Client::builder()
            .timeout(self.config.timeout)
            .connect_timeout(self.config.connect_timeout)
            .redirect(redirect)
            .user_agent(self.config.user_agent.as_str())
            .default_headers(self.headers)
            .build()?;

        Ok(HttpClient {
            client,
            config: Arc::new(self.config),
        })
    }
}

/// A cloneable handle to a shared connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    config: Arc<HttpClientConfig>,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Send a request.
    ///
    /// Any status is returned as a response; only transport failures are
    /// errors here.
    pub async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let url = request.full_url()?;
        tracing::debug!(target: targets::HTTP, method = %request.method, %url, "sending request");

        let mut outgoing = self
            .client
            .request(request.method.into(), url)
            .headers(request.headers);

        if let Some(token) = &request.bearer_token {
            outgoing = outgoing.bearer_auth(token);
        }
        if let Some(timeout) = request.timeout {
            outgoing = outgoing.timeout(timeout);
        }
        outgoing = match request.body {
            RequestBody::Empty => outgoing,
            RequestBody::Json(value) => outgoing.json(&value),
            RequestBody::Text(text) => outgoing.body(text),
        };

        let response = outgoing.send().await?;
        tracing::trace!(target: targets::HTTP, status = response.status().as_u16(), "response received");
        Ok(HttpResponse::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetworkError;

    #[test]
    fn test_default_config() {
        let config = HttpClientConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.user_agent.starts_with("judge-console/"));
    }

    #[test]
    fn test_invalid_default_header() {
        let err = HttpClientBuilder::new()
            .default_header("bad header", "x")
            .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidHeader(_)));
    }

    #[test]
    fn test_builder_keeps_settings() {
        let client = HttpClient::builder()
            .timeout(Duration::from_secs(2))
            .redirect_limit(0)
            .user_agent("console-tests")
            .build()
            .unwrap();
        assert_eq!(client.config().timeout, Duration::from_secs(2));
        assert_eq!(client.config().redirect_limit, 0);
        assert_eq!(client.config().user_agent, "console-tests");
    }
}
