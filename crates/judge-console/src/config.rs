//! Console configuration.
//!
//! Settings are read from TOML. Every key is optional; missing keys take the
//! defaults below.
//!
//! ```toml
//! [api]
//! base_url = "https://judge.example.com/api"
//! timeout_ms = 5000
//!
//! [list]
//! debounce_ms = 500
//! default_limit = 20
//! ```

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use judge_console_core::logging::targets;
use judge_console_net::{HttpClientBuilder, NetworkError, RestApiClient, SessionStore};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::list::ListOptions;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;
pub const DEFAULT_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_LIMIT: u32 = 10;

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ApiConfig {
    /// Base URL that resource paths are joined onto.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout_ms: u64,
    /// TCP connect timeout.
    pub connect_timeout_ms: u64,
    /// Overrides the client's default `User-Agent`.
    pub user_agent: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            connect_timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: None,
        }
    }
}

/// List controller settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListConfig {
    /// Keyword debounce window.
    pub debounce_ms: u64,
    /// Initial page size.
    pub default_limit: u32,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    pub api: ApiConfig,
    pub list: ListConfig,
}

impl ConsoleConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Write the configuration as TOML.
    pub fn save(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check value ranges.
    pub fn validate(&self) -> ConfigResult<()> {
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        match url::Url::parse(base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => {
                return Err(ConfigError::Invalid(format!(
                    "api.base_url must be an http(s) URL, got {base_url:?}"
                )));
            }
        }
        if self.api.timeout_ms == 0 {
            return Err(ConfigError::Invalid("api.timeout_ms must be positive".into()));
        }
        if self.list.default_limit == 0 {
            return Err(ConfigError::Invalid("list.default_limit must be positive".into()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.api.timeout_ms)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.list.debounce_ms)
    }

    /// Options for new list controllers.
    pub fn list_options(&self) -> ListOptions {
        ListOptions::new()
            .limit(self.list.default_limit)
            .debounce(self.debounce())
    }

    /// Build a JSON REST client authenticated from `session`.
    pub fn rest_client(&self, session: Arc<dyn SessionStore>) -> Result<RestApiClient, NetworkError> {
        let mut http = HttpClientBuilder::new()
            .timeout(self.timeout())
            .connect_timeout(Duration::from_millis(self.api.connect_timeout_ms));
        if let Some(agent) = &self.api.user_agent {
            http = http.user_agent(agent.clone());
        }

        RestApiClient::builder(self.api.base_url.trim())
            .http_client_builder(http)
            .session(session)
            .json_api()
            .build()
    }
}
