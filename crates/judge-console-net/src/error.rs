//! Error types for the networking crate.

use thiserror::Error;

/// Everything that can go wrong between building a request and decoding
/// its body.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// A request body could not be encoded.
    #[error("JSON encoding failed: {0}")]
    Json(String),

    /// The response body did not match the expected envelope.
    #[error("invalid response body: {0}")]
    InvalidBody(String),

    /// The server rejected the session token.
    #[error("unauthorized{}", suffix(.message))]
    Unauthorized { message: Option<String> },

    /// Any other non-2xx status.
    #[error("HTTP {status}{}", suffix(.message))]
    HttpStatus { status: u16, message: Option<String> },

    #[error("too many redirects")]
    TooManyRedirects,
}

fn suffix(message: &Option<String>) -> String {
    message.as_deref().map(|m| format!(": {m}")).unwrap_or_default()
}

impl NetworkError {
    /// The HTTP status code carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthorized { .. } => Some(401),
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => Self::Unauthorized { message },
            _ => Self::HttpStatus { status, message },
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        let text = err.to_string();
        match () {
            _ if err.is_timeout() => Self::Timeout,
            _ if err.is_connect() => Self::Connection(text),
            _ if err.is_redirect() => Self::TooManyRedirects,
            _ if err.is_decode() => Self::InvalidBody(text),
            _ => Self::Request(text),
        }
    }
}

macro_rules! string_errors {
    ($($source:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$source> for NetworkError {
                fn from(err: $source) -> Self {
                    Self::$variant(err.to_string())
                }
            }
        )*
    };
}

string_errors! {
    url::ParseError => InvalidUrl,
    serde_json::Error => Json,
    http::header::InvalidHeaderName => InvalidHeader,
    http::header::InvalidHeaderValue => InvalidHeader,
}

pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_maps_401() {
        let err = NetworkError::from_status(401, None);
        assert_eq!(err, NetworkError::Unauthorized { message: None });
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "unauthorized");

        let err = NetworkError::from_status(503, Some("maintenance".into()));
        assert_eq!(err.to_string(), "HTTP 503: maintenance");
    }

    #[test]
    fn test_transport_errors_have_no_status() {
        assert_eq!(NetworkError::Timeout.status(), None);
        assert_eq!(NetworkError::Connection("refused".into()).status(), None);
    }

    #[test]
    fn test_header_errors_convert() {
        let err: NetworkError = http::HeaderName::from_bytes(b"bad header")
            .map(|_| ())
            .map_err(NetworkError::from)
            .unwrap_err();
        assert!(matches!(err, NetworkError::InvalidHeader(_)));
    }
}
