//! Outgoing requests.

use std::fmt;
use std::time::Duration;

use crate::error::Result;

/// Methods the console sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether parameters travel in a JSON body instead of the query string.
    pub fn carries_body(self) -> bool {
        !matches!(self, HttpMethod::Get | HttpMethod::Delete)
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request payload.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(serde_json::Value),
    Text(String),
}

/// A fully resolved request, ready for [`HttpClient::execute`](super::HttpClient::execute).
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub url: String,
    pub headers: http::HeaderMap,
    /// Query parameters in the order they are appended.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
    /// Overrides the client-wide timeout.
    pub timeout: Option<Duration>,
    /// Sent as `Authorization: Bearer <token>`.
    pub bearer_token: Option<String>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: http::HeaderMap::new(),
            query: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
            bearer_token: None,
        }
    }

    /// First value of a query parameter.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v.as_str()))
    }

    /// The URL with the query string appended.
    pub fn full_url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }
        Ok(url)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("body", &self.body)
            .field("authenticated", &self.bearer_token.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_url_appends_query() {
        let mut request = HttpRequest::new(HttpMethod::Get, "https://judge.example.com/api/tags");
        request.query.push(("search".into(), "dynamic programming".into()));
        request.query.push(("tagIds".into(), "1,2".into()));

        let url = request.full_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://judge.example.com/api/tags?search=dynamic+programming&tagIds=1%2C2"
        );
        assert_eq!(request.query_value("tagIds"), Some("1,2"));
        assert_eq!(request.query_value("page"), None);
    }

    #[test]
    fn test_debug_hides_token() {
        let mut request = HttpRequest::new(HttpMethod::Post, "https://judge.example.com");
        request.bearer_token = Some("secret".into());
        let text = format!("{request:?}");
        assert!(!text.contains("secret"));
        assert!(text.contains("authenticated: true"));
    }

    #[test]
    fn test_body_placement() {
        assert!(!HttpMethod::Get.carries_body());
        assert!(HttpMethod::Post.carries_body());
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
