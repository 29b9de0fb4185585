//! Incoming responses.

use serde::de::DeserializeOwned;

use crate::error::{NetworkError, Result};

/// A response whose body has not been read yet.
pub struct HttpResponse {
    inner: reqwest::Response,
}

impl HttpResponse {
    pub(crate) fn new(inner: reqwest::Response) -> Self {
        Self { inner }
    }

    pub fn status(&self) -> u16 {
        self.inner.status().as_u16()
    }

    /// 2xx status.
    pub fn is_success(&self) -> bool {
        self.inner.status().is_success()
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.inner.headers().get(name)?.to_str().ok()
    }

    /// The URL that produced this response, after redirects.
    pub fn url(&self) -> &str {
        self.inner.url().as_str()
    }

    pub async fn text(self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    /// Decode the body. A body that does not fit `T` is
    /// [`NetworkError::InvalidBody`].
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.inner.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| NetworkError::InvalidBody(e.to_string()))
    }

    /// Turn a non-2xx response into an error, consuming the body for the message.
    ///
    /// The message is taken from a JSON `message` field when the backend sends
    /// one (a string or an array of strings), otherwise from the raw body text.
    pub async fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            return Ok(self);
        }
        let status = self.status();
        let message = self
            .text()
            .await
            .ok()
            .as_deref()
            .and_then(extract_error_message);
        Err(NetworkError::from_status(status, message))
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<serde_json::Value>(trimmed) {
        Ok(value) => match value.get("message") {
            Some(serde_json::Value::String(msg)) => Some(msg.clone()),
            Some(serde_json::Value::Array(items)) => {
                let parts: Vec<&str> = items.iter().filter_map(|v| v.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        },
        Err(_) => Some(trimmed.to_string()),
    }
}

impl std::fmt::Debug for HttpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpResponse")
            .field("status", &self.status())
            .field("url", &self.url())
            .finish()
    }
}
