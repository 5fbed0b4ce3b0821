//! Core types shared by the query builder, transport and decoder

use crate::error::SerpResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use url::Url;

/// Decoded JSON object returned by most endpoints.
///
/// The service's payload shape differs between engines and changes over
/// time, so it is kept as an untyped tree. See [`crate::value::ValueExt`]
/// for checked accessors.
pub type SerpResponse = serde_json::Map<String, serde_json::Value>;

/// Decoded JSON array returned by endpoints whose root is a list (locations)
pub type SerpResponseArray = Vec<serde_json::Value>;

/// Body format requested from the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Json,
    Html,
}

impl OutputFormat {
    /// File extension used by archive paths
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
        }
    }
}

/// Search engines exposed by the service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engine {
    #[default]
    Google,
    GoogleScholar,
    GoogleMaps,
    Bing,
    Baidu,
    Yahoo,
    Yandex,
    Ebay,
    Youtube,
    Walmart,
    HomeDepot,
    AppleAppStore,
    Naver,
    DuckDuckGo,
    /// Any engine name the enum does not list yet
    Other(String),
}

impl Engine {
    /// Value of the `engine` request parameter
    pub fn as_param(&self) -> &str {
        match self {
            Engine::Google => "google",
            Engine::GoogleScholar => "google_scholar",
            Engine::GoogleMaps => "google_maps",
            Engine::Bing => "bing",
            Engine::Baidu => "baidu",
            Engine::Yahoo => "yahoo",
            Engine::Yandex => "yandex",
            Engine::Ebay => "ebay",
            Engine::Youtube => "youtube",
            Engine::Walmart => "walmart",
            Engine::HomeDepot => "home_depot",
            Engine::AppleAppStore => "apple_app_store",
            Engine::Naver => "naver",
            Engine::DuckDuckGo => "duckduckgo",
            Engine::Other(name) => name,
        }
    }

    /// Parameter carrying the query text for this engine
    pub fn query_param(&self) -> &'static str {
        match self {
            Engine::Yahoo => "p",
            Engine::Yandex => "text",
            Engine::Ebay => "_nkw",
            Engine::Youtube => "search_query",
            Engine::AppleAppStore => "term",
            _ => "q",
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_param())
    }
}

impl From<&str> for Engine {
    fn from(name: &str) -> Self {
        match name {
            "google" => Engine::Google,
            "google_scholar" => Engine::GoogleScholar,
            "google_maps" => Engine::GoogleMaps,
            "bing" => Engine::Bing,
            "baidu" => Engine::Baidu,
            "yahoo" => Engine::Yahoo,
            "yandex" => Engine::Yandex,
            "ebay" => Engine::Ebay,
            "youtube" => Engine::Youtube,
            "walmart" => Engine::Walmart,
            "home_depot" => Engine::HomeDepot,
            "apple_app_store" => Engine::AppleAppStore,
            "naver" => Engine::Naver,
            "duckduckgo" => Engine::DuckDuckGo,
            other => Engine::Other(other.to_string()),
        }
    }
}

/// Everything the transport needs to issue one call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    /// Path below the base URL, starting with `/`
    pub path: String,
    pub params: BTreeMap<String, String>,
    pub format: OutputFormat,
}

impl RequestDescriptor {
    pub fn get(path: impl Into<String>, format: OutputFormat) -> Self {
        Self {
            method: HttpMethod::Get,
            path: path.into(),
            params: BTreeMap::new(),
            format,
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Base URL joined with the path only
    pub fn endpoint(&self, base_url: &str) -> SerpResult<Url> {
        Ok(Url::parse(base_url)?.join(&self.path)?)
    }

    /// Fully-qualified URL with every parameter in the query string
    pub fn url(&self, base_url: &str) -> SerpResult<Url> {
        let mut url = self.endpoint(base_url)?;
        if !self.params.is_empty() {
            url.query_pairs_mut().extend_pairs(self.params.iter());
        }
        Ok(url)
    }

    /// URL suitable for logs: the API key is masked
    pub fn redacted_url(&self, base_url: &str) -> String {
        let mut redacted = self.clone();
        if let Some(key) = redacted.params.get_mut("api_key") {
            *key = "***".to_string();
        }
        redacted
            .url(base_url)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| format!("{base_url}{}", self.path))
    }
}
