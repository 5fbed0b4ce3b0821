//! Client for the search, location, account and archive endpoints

use crate::{
    config::ClientConfig,
    decode,
    error::{SerpError, SerpResult},
    query::SearchQuery,
    types::{OutputFormat, RequestDescriptor, SerpResponse, SerpResponseArray},
    utils::http::{HttpClient, Transport},
};
use std::sync::Arc;

/// Path of the location lookup endpoint
pub const LOCATIONS_PATH: &str = "/locations.json";

/// Path of the account endpoint
pub const ACCOUNT_PATH: &str = "/account";

/// Prefix of archived search paths, followed by `<id>.<format>`
pub const ARCHIVE_PATH_PREFIX: &str = "/searches/";

/// Client for the SerpApi service.
///
/// Each call is one HTTP round trip followed by one decode. There is no
/// retry, caching or batching.
#[derive(Debug, Clone)]
pub struct SerpClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl SerpClient {
    /// Client backed by `reqwest` for the given configuration
    pub fn new(config: ClientConfig) -> SerpResult<Self> {
        let transport = HttpClient::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Client that sends every request through `transport`
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self { config, transport }
    }

    /// Client configured from the environment
    pub fn from_env() -> SerpResult<Self> {
        Self::new(ClientConfig::from_env())
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Run a search and decode the JSON response
    pub async fn get_json(&self, query: &SearchQuery) -> SerpResult<SerpResponse> {
        let request = query.build(OutputFormat::Json, &self.config)?;
        self.fetch_json(&request).await
    }

    /// Run a search and return the rendered results page untouched
    pub async fn get_html(&self, query: &SearchQuery) -> SerpResult<String> {
        let request = query.build(OutputFormat::Html, &self.config)?;
        self.fetch_text(&request).await
    }

    /// Look up supported locations matching `text`, at most `limit` of them
    pub async fn get_location(&self, text: &str, limit: usize) -> SerpResult<SerpResponseArray> {
        let request = RequestDescriptor::get(LOCATIONS_PATH, OutputFormat::Json)
            .with_param("q", text)
            .with_param("limit", limit.to_string());

        let raw = self.transport.execute(&request).await?;
        let mut locations = decode::decode_json_array(raw.body.as_slice())?;
        locations.truncate(limit);
        Ok(locations)
    }

    /// Account details for the client's key
    pub async fn get_account(&self) -> SerpResult<SerpResponse> {
        let api_key = self.config.resolve_api_key()?;
        let request = RequestDescriptor::get(ACCOUNT_PATH, OutputFormat::Json)
            .with_param("api_key", api_key);
        self.fetch_json(&request).await
    }

    /// Stored result of a previous search, by its `search_metadata.id`
    pub async fn get_search_archive(&self, search_id: &str) -> SerpResult<SerpResponse> {
        let request = self.archive_request(search_id, OutputFormat::Json)?;
        self.fetch_json(&request).await
    }

    /// Stored results page of a previous search
    pub async fn get_search_archive_html(&self, search_id: &str) -> SerpResult<String> {
        let request = self.archive_request(search_id, OutputFormat::Html)?;
        self.fetch_text(&request).await
    }

    fn archive_request(&self, search_id: &str, format: OutputFormat) -> SerpResult<RequestDescriptor> {
        if search_id.is_empty() || search_id.contains(['/', '?', '#']) {
            return Err(SerpError::InvalidInput(format!(
                "Invalid search id `{search_id}`"
            )));
        }

        let api_key = self.config.resolve_api_key()?;
        let path = format!("{ARCHIVE_PATH_PREFIX}{search_id}.{}", format.extension());
        Ok(RequestDescriptor::get(path, format).with_param("api_key", api_key))
    }

    async fn fetch_json(&self, request: &RequestDescriptor) -> SerpResult<SerpResponse> {
        let raw = self.transport.execute(request).await?;
        decode::decode_json(raw.body.as_slice())
    }

    async fn fetch_text(&self, request: &RequestDescriptor) -> SerpResult<String> {
        let raw = self.transport.execute(request).await?;
        decode::decode_text(raw.body)
    }
}
