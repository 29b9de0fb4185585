//! Error types for judge-console core.

use std::fmt;

/// Errors raised by the core primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A component that spawns tasks was created outside a tokio runtime.
    NoRuntime,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRuntime => write!(
                f,
                "No tokio runtime available. Create this component from within a runtime context"
            ),
        }
    }
}

impl std::error::Error for CoreError {}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
