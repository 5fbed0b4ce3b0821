//! # google-search-results
//!
//! Client for the [SerpApi](https://serpapi.com) search results service. It
//! builds parameterized search requests, sends them over HTTPS and decodes
//! the JSON (or HTML) answer. Location lookup, account information and
//! retrieval of archived searches are covered as well.
//!
//! Responses are kept as untyped JSON trees ([`SerpResponse`]): their shape
//! depends on the engine and the query, and changes upstream over time.
//! Use [`value::ValueExt`] for lookups that fail loudly on a shape mismatch.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use google_search_results::{ClientConfig, SearchQuery, SerpClient, ValueExt};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SerpClient::new(ClientConfig::new().with_api_key("YOUR_API_KEY"))?;
//!
//!     let query = SearchQuery::google("Coffee")
//!         .param("location", "Portland, Oregon, United States")
//!         .param("hl", "en")
//!         .param("gl", "us");
//!
//!     let rsp = client.get_json(&query).await?;
//!     for result in rsp.array_at("organic_results")? {
//!         println!("{}", result.str_at("title")?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod query;
pub mod types;
pub mod utils;
pub mod value;

// Re-export common types
pub use client::SerpClient;
pub use config::{clear_api_key, set_api_key, ClientConfig};
pub use error::{SerpError, SerpResult as Result};
pub use query::SearchQuery;
pub use types::{Engine, OutputFormat, SerpResponse, SerpResponseArray};
pub use value::{ArrayExt, ValueExt};

/// Run a search with the default configuration and decode the JSON response.
///
/// The key comes from the query or, failing that, from [`set_api_key`].
///
/// # Examples
///
/// ```rust,no_run
/// use google_search_results::{search_json, set_api_key, SearchQuery};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// set_api_key("demo");
/// let rsp = search_json(&SearchQuery::google("Coffee")).await?;
/// println!("{}", rsp["search_metadata"]["id"]);
/// # Ok(())
/// # }
/// ```
pub async fn search_json(query: &SearchQuery) -> Result<SerpResponse> {
    SerpClient::new(ClientConfig::default())?
        .get_json(query)
        .await
}

/// Run a search with the default configuration and return the HTML page
pub async fn search_html(query: &SearchQuery) -> Result<String> {
    SerpClient::new(ClientConfig::default())?
        .get_html(query)
        .await
}

/// Human hint for a failed call, used by the CLI when reporting errors
pub fn troubleshooting_info(error: &SerpError) -> String {
    match error {
        SerpError::ConfigError(_) => {
            "Set SERPAPI_API_KEY, pass --api-key, or add `api_key` to the query parameters.".to_string()
        }
        SerpError::HttpError { .. } | SerpError::Timeout { .. } => {
            "The service could not be reached. Check your network connection and the base URL.".to_string()
        }
        SerpError::ApiError(message) => {
            let lower = message.to_lowercase();
            if lower.contains("api key") {
                "Check that your SerpApi key is valid: https://serpapi.com/manage-api-key".to_string()
            } else if lower.contains("credit") || lower.contains("searches") {
                "Verify that you have enough searches remaining in your SerpApi account.".to_string()
            } else if lower.contains("rate") {
                "You've exceeded the rate limit for this API. Try again later or reduce your request frequency.".to_string()
            } else {
                "The service rejected the request. Check the query parameters for this engine.".to_string()
            }
        }
        SerpError::DecodeError(_) => {
            "The response was not in the expected format. Check the base URL and the output format.".to_string()
        }
        SerpError::InvalidInput(_) | SerpError::MissingField(_) | SerpError::UnexpectedShape { .. } => {
            "Check your input and the shape of the response you are reading.".to_string()
        }
    }
}
