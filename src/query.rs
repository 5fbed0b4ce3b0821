//! Search query builder

use crate::{
    config::ClientConfig,
    error::SerpResult,
    types::{Engine, OutputFormat, RequestDescriptor},
};
use std::collections::HashMap;

/// Path of the search endpoint
pub const SEARCH_PATH: &str = "/search";

/// Parameter names accepted as a per-query key, in order of preference
pub const API_KEY_PARAMS: [&str; 2] = ["api_key", "serp_api_key"];

/// Value sent as the `source` parameter on every search
pub const SOURCE: &str = "rust";

/// Parameters of one search request.
///
/// Values are passed through to the service as-is; see the service's
/// documentation for the names each engine understands (`q`, `location`,
/// `hl`, `gl`, `google_domain`, `safe`, `start`, `num`, `device`, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    params: HashMap<String, String>,
}

impl SearchQuery {
    /// Empty query for the given engine
    pub fn new(engine: impl Into<Engine>) -> Self {
        Self::default().with_engine(engine)
    }

    /// Query from a raw parameter map, engine taken from `engine` if present
    pub fn from_params<K, V, I>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: params
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Google search for `text`
    pub fn google(text: &str) -> Self {
        Self::with_text(Engine::Google, text)
    }

    pub fn bing(text: &str) -> Self {
        Self::with_text(Engine::Bing, text)
    }

    pub fn baidu(text: &str) -> Self {
        Self::with_text(Engine::Baidu, text)
    }

    pub fn yahoo(text: &str) -> Self {
        Self::with_text(Engine::Yahoo, text)
    }

    pub fn yandex(text: &str) -> Self {
        Self::with_text(Engine::Yandex, text)
    }

    pub fn ebay(text: &str) -> Self {
        Self::with_text(Engine::Ebay, text)
    }

    pub fn youtube(text: &str) -> Self {
        Self::with_text(Engine::Youtube, text)
    }

    pub fn walmart(text: &str) -> Self {
        Self::with_text(Engine::Walmart, text)
    }

    pub fn duckduckgo(text: &str) -> Self {
        Self::with_text(Engine::DuckDuckGo, text)
    }

    /// Query for `engine`, with `text` under that engine's query parameter
    pub fn with_text(engine: Engine, text: &str) -> Self {
        let key = engine.query_param();
        Self::new(engine).param(key, text)
    }

    pub fn with_engine(self, engine: impl Into<Engine>) -> Self {
        let engine = engine.into();
        self.param("engine", engine.as_param())
    }

    /// Set one parameter, replacing any previous value
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Per-query key; overrides the client's and the process-wide key
    pub fn with_api_key(self, api_key: impl Into<String>) -> Self {
        self.param("api_key", api_key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Engine named by the `engine` parameter, Google when unset
    pub fn engine(&self) -> Engine {
        self.get("engine").map(Engine::from).unwrap_or_default()
    }

    /// Key carried by the query itself, if any non-empty one is present
    pub fn own_api_key(&self) -> Option<&str> {
        API_KEY_PARAMS
            .iter()
            .filter_map(|name| self.get(name))
            .find(|key| !key.is_empty())
    }

    /// Effective key: the query's own, else the client's, else the process-wide default
    pub fn resolve_api_key(&self, config: &ClientConfig) -> SerpResult<String> {
        match self.own_api_key() {
            Some(key) => Ok(key.to_string()),
            None => config.resolve_api_key(),
        }
    }

    /// Request descriptor for the search endpoint.
    ///
    /// Fails only with [`crate::SerpError::ConfigError`], when no key resolves.
    /// Parameters are copied verbatim and no I/O is performed.
    pub fn build(&self, format: OutputFormat, config: &ClientConfig) -> SerpResult<RequestDescriptor> {
        let api_key = self.resolve_api_key(config)?;

        let mut descriptor = RequestDescriptor::get(SEARCH_PATH, format);
        descriptor.params.extend(
            self.params
                .iter()
                .filter(|(key, _)| !API_KEY_PARAMS.contains(&key.as_str()))
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        descriptor
            .params
            .entry("engine".to_string())
            .or_insert_with(|| Engine::Google.as_param().to_string());
        descriptor
            .params
            .insert("output".to_string(), format.to_string());
        descriptor
            .params
            .insert("source".to_string(), SOURCE.to_string());
        descriptor.params.insert("api_key".to_string(), api_key);

        Ok(descriptor)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_params(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{clear_api_key, set_api_key};
    use crate::error::SerpError;
    use crate::types::HttpMethod;
    use serial_test::serial;

    fn coffee() -> SearchQuery {
        SearchQuery::from_params([("q", "Coffee"), ("location", "Portland")])
    }

    #[test]
    #[serial]
    fn test_global_key_substituted_when_query_has_none() {
        set_api_key("global-key");
        let descriptor = coffee()
            .build(OutputFormat::Json, &ClientConfig::default())
            .unwrap();
        assert_eq!(descriptor.params["api_key"], "global-key");
        clear_api_key();
    }

    #[test]
    #[serial]
    fn test_query_key_overrides_global() {
        set_api_key("global-key");
        let descriptor = coffee()
            .with_api_key("own-key")
            .build(OutputFormat::Json, &ClientConfig::default())
            .unwrap();
        assert_eq!(descriptor.params["api_key"], "own-key");
        clear_api_key();
    }

    #[test]
    #[serial]
    fn test_serp_api_key_alias_is_normalized() {
        clear_api_key();
        let descriptor = coffee()
            .param("serp_api_key", "alias-key")
            .build(OutputFormat::Json, &ClientConfig::default())
            .unwrap();
        assert_eq!(descriptor.params["api_key"], "alias-key");
        assert!(!descriptor.params.contains_key("serp_api_key"));
    }

    #[test]
    #[serial]
    fn test_empty_query_key_falls_back_to_config() {
        clear_api_key();
        let config = ClientConfig::new().with_api_key("config-key");
        let descriptor = coffee()
            .with_api_key("")
            .build(OutputFormat::Json, &config)
            .unwrap();
        assert_eq!(descriptor.params["api_key"], "config-key");
    }

    #[test]
    #[serial]
    fn test_missing_key_is_config_error() {
        clear_api_key();
        let result = coffee().build(OutputFormat::Json, &ClientConfig::default());
        assert!(matches!(result, Err(SerpError::ConfigError(_))));
    }

    #[test]
    fn test_descriptor_contents() {
        let config = ClientConfig::new().with_api_key("k");
        let descriptor = coffee().build(OutputFormat::Html, &config).unwrap();

        assert_eq!(descriptor.method, HttpMethod::Get);
        assert_eq!(descriptor.path, "/search");
        assert_eq!(descriptor.format, OutputFormat::Html);
        assert_eq!(descriptor.params["output"], "html");
        assert_eq!(descriptor.params["source"], "rust");
        assert_eq!(descriptor.params["engine"], "google");
        assert_eq!(descriptor.params["q"], "Coffee");
        assert_eq!(descriptor.params["location"], "Portland");
    }

    #[test]
    fn test_engine_shortcuts() {
        let yahoo = SearchQuery::yahoo("coffee");
        assert_eq!(yahoo.get("p"), Some("coffee"));
        assert_eq!(yahoo.engine(), Engine::Yahoo);

        let bing = SearchQuery::bing("coffee");
        assert_eq!(bing.get("q"), Some("coffee"));
        assert_eq!(bing.get("engine"), Some("bing"));

        assert_eq!(coffee().engine(), Engine::Google);
    }

    #[test]
    fn test_explicit_engine_preserved() {
        let config = ClientConfig::new().with_api_key("k");
        let descriptor = SearchQuery::baidu("coffee")
            .build(OutputFormat::Json, &config)
            .unwrap();
        assert_eq!(descriptor.params["engine"], "baidu");
    }

    #[test]
    fn test_unusual_params_passed_through() {
        let config = ClientConfig::new().with_api_key("k");
        let descriptor = coffee()
            .param("", "x")
            .param("tbs", "")
            .build(OutputFormat::Json, &config)
            .unwrap();
        assert_eq!(descriptor.params[""], "x");
        assert_eq!(descriptor.params["tbs"], "");
        assert_eq!(descriptor.params["api_key"], "k");
    }

    #[test]
    fn test_collect_into_query() {
        let query: SearchQuery = vec![("q".to_string(), "tea".to_string())]
            .into_iter()
            .collect();
        assert_eq!(query.get("q"), Some("tea"));
        assert_eq!(query.own_api_key(), None);
    }
}
