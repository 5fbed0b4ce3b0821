//! Client configuration and the process-wide default API key

use crate::error::{SerpError, SerpResult};
use std::env;
use std::sync::RwLock;

/// Public service endpoint
pub const DEFAULT_BASE_URL: &str = "https://serpapi.com";

/// Key accepted by the service for its demo queries
pub const DEMO_API_KEY: &str = "demo";

/// Environment variables consulted for a default key, in order
pub const API_KEY_ENV_VARS: [&str; 2] = ["SERPAPI_API_KEY", "API_KEY"];

/// Overrides [`DEFAULT_BASE_URL`] when set
pub const BASE_URL_ENV_VAR: &str = "SERPAPI_BASE_URL";

static DEFAULT_API_KEY: RwLock<Option<String>> = RwLock::new(None);

/// Set the process-wide fallback key.
///
/// Meant for bootstrap and test setup. Queries that carry their own key,
/// and clients configured with one, never read it. Set it before issuing
/// concurrent queries; changing it while requests are being built is not
/// coordinated with them.
pub fn set_api_key(key: impl Into<String>) {
    let mut slot = DEFAULT_API_KEY.write().unwrap_or_else(|e| e.into_inner());
    *slot = Some(key.into());
}

/// Current process-wide fallback key, if any
pub fn api_key() -> Option<String> {
    DEFAULT_API_KEY
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .clone()
}

/// Forget the process-wide fallback key
pub fn clear_api_key() {
    let mut slot = DEFAULT_API_KEY.write().unwrap_or_else(|e| e.into_inner());
    *slot = None;
}

/// Read the default key from the environment, falling back to [`DEMO_API_KEY`]
pub fn api_key_from_env() -> String {
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEMO_API_KEY.to_string())
}

/// Set the process-wide key from the environment and return it
pub fn init_api_key_from_env() -> String {
    let key = api_key_from_env();
    set_api_key(key.clone());
    key
}

/// Settings shared by every request a [`crate::SerpClient`] sends
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Key used when a query does not carry its own
    pub api_key: Option<String>,
    /// Scheme and host of the service, without a trailing path
    pub base_url: String,
    /// Per-request timeout. `None` keeps the HTTP client's default
    pub timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: None,
            user_agent: format!("google-search-results-rust/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration built from `SERPAPI_API_KEY` / `API_KEY` and `SERPAPI_BASE_URL`
    pub fn from_env() -> Self {
        let mut config = Self::default().with_api_key(api_key_from_env());
        if let Ok(base_url) = env::var(BASE_URL_ENV_VAR) {
            if !base_url.is_empty() {
                config.base_url = base_url;
            }
        }
        config
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Key from this configuration, else the process-wide default.
    ///
    /// Empty strings count as absent.
    pub fn resolve_api_key(&self) -> SerpResult<String> {
        self.api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| api_key().filter(|key| !key.is_empty()))
            .ok_or_else(|| {
                SerpError::ConfigError(
                    "SerpApi key is required: pass `api_key` in the query, configure the client with one, or call `set_api_key`".to_string(),
                )
            })
    }

    /// Check the base URL parses and has no path component
    pub fn validate(&self) -> SerpResult<()> {
        let url = url::Url::parse(&self.base_url)?;
        if url.cannot_be_a_base() {
            return Err(SerpError::ConfigError(format!(
                "Base URL `{}` cannot be used as a base",
                self.base_url
            )));
        }
        if url.path() != "/" && !url.path().is_empty() {
            return Err(SerpError::ConfigError(format!(
                "Base URL `{}` must not contain a path",
                self.base_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_explicit_key_wins_over_global() {
        set_api_key("global-key");
        let config = ClientConfig::new().with_api_key("explicit-key");
        assert_eq!(config.resolve_api_key().unwrap(), "explicit-key");
        clear_api_key();
    }

    #[test]
    #[serial]
    fn test_global_key_fallback() {
        set_api_key("global-key");
        let config = ClientConfig::new();
        assert_eq!(config.resolve_api_key().unwrap(), "global-key");
        clear_api_key();
    }

    #[test]
    #[serial]
    fn test_empty_explicit_key_falls_back() {
        set_api_key("global-key");
        let config = ClientConfig::new().with_api_key("");
        assert_eq!(config.resolve_api_key().unwrap(), "global-key");
        clear_api_key();
    }

    #[test]
    #[serial]
    fn test_no_key_is_config_error() {
        clear_api_key();
        let result = ClientConfig::new().resolve_api_key();
        match result {
            Err(SerpError::ConfigError(msg)) => assert!(msg.contains("SerpApi key is required")),
            other => panic!("Expected ConfigError, got {other:?}"),
        }
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "https://serpapi.com");
        assert!(config.api_key.is_none());
        assert!(config.timeout_ms.is_none());
        assert!(config.user_agent.starts_with("google-search-results-rust/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_path_and_garbage() {
        let with_path = ClientConfig::new().with_base_url("https://serpapi.com/search");
        assert!(matches!(with_path.validate(), Err(SerpError::ConfigError(_))));

        let garbage = ClientConfig::new().with_base_url("not a url");
        assert!(matches!(garbage.validate(), Err(SerpError::ConfigError(_))));
    }

    #[test]
    #[serial]
    fn test_api_key_from_env_order_and_fallback() {
        let saved: Vec<_> = API_KEY_ENV_VARS.iter().map(|name| env::var(name).ok()).collect();

        env::remove_var("SERPAPI_API_KEY");
        env::remove_var("API_KEY");
        assert_eq!(api_key_from_env(), DEMO_API_KEY);

        env::set_var("API_KEY", "from-api-key");
        assert_eq!(api_key_from_env(), "from-api-key");

        env::set_var("SERPAPI_API_KEY", "from-serpapi");
        assert_eq!(api_key_from_env(), "from-serpapi");

        assert_eq!(init_api_key_from_env(), "from-serpapi");
        assert_eq!(api_key().as_deref(), Some("from-serpapi"));
        clear_api_key();

        for (name, value) in API_KEY_ENV_VARS.iter().zip(saved) {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}
