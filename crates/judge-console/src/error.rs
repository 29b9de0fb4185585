//! Error types for the console crate.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Client-side validation failures of a filter set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A custom date range is missing its start or end.
    #[error("custom date range needs both a start and an end date")]
    MissingDateBound,

    /// A custom date range ends before it starts.
    #[error("date range starts on {from} but ends on {to}")]
    InvertedDateRange { from: NaiveDate, to: NaiveDate },
}

/// Errors returned by list controller operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ControllerError {
    /// The controller was created outside a tokio runtime.
    #[error("list controllers must be created inside a tokio runtime")]
    NoRuntime,

    /// The filter set failed validation; the request was left unchanged.
    #[error("invalid filters: {0}")]
    InvalidFilters(#[from] FilterError),
}

/// Errors raised while loading or validating configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read or written.
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid TOML or has the wrong shape.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
