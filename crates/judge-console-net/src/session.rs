//! Session token sources.
//!
//! Every outgoing request reads the bearer token at send time, so a login or
//! logout elsewhere in the application takes effect on the next request
//! without rebuilding the client.

use parking_lot::RwLock;

/// Supplies the access token for the current session.
pub trait SessionStore: Send + Sync {
    /// The current access token, or `None` when signed out.
    fn access_token(&self) -> Option<String>;
}

/// An in-memory session shared between the login flow and the REST client.
#[derive(Debug, Default)]
pub struct MemorySession {
    token: RwLock<Option<String>>,
}

impl MemorySession {
    /// Create a signed-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }

    /// Store a new token.
    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.write() = Some(token.into());
    }

    /// Forget the current token.
    pub fn sign_out(&self) {
        self.token.write().take();
    }

    /// Whether a token is present.
    pub fn is_signed_in(&self) -> bool {
        self.token.read().is_some()
    }
}

impl SessionStore for MemorySession {
    fn access_token(&self) -> Option<String> {
        self.token.read().clone()
    }
}
