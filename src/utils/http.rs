//! HTTP transport for the search service

use crate::{
    config::ClientConfig,
    error::{SerpError, SerpResult},
    types::{HttpMethod, RequestDescriptor},
};
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Status and body of one completed HTTP exchange
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Anything able to carry a [`RequestDescriptor`] to the service
#[async_trait::async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Issue the request and return the raw body.
    ///
    /// A non-2xx status is not an error here: the service reports most
    /// failures inside the body, so it is handed back for decoding.
    async fn execute(&self, request: &RequestDescriptor) -> SerpResult<RawResponse>;
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Create a transport for the configured base URL
    pub fn new(config: &ClientConfig) -> SerpResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SerpError::ConfigError(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout_ms.map(Duration::from_millis),
        })
    }

    /// The per-request timeout covers the body too, so both phases map
    /// timeouts the same way.
    fn map_error(&self, error: reqwest::Error, status_code: Option<u16>) -> SerpError {
        if error.is_timeout() {
            SerpError::Timeout {
                timeout_ms: self.timeout.map(|t| t.as_millis() as u64).unwrap_or_default(),
            }
        } else {
            let phase = if status_code.is_some() { "read response" } else { "send request" };
            SerpError::HttpError {
                message: format!("Failed to {phase}: {error}"),
                status_code,
            }
        }
    }
}

#[async_trait::async_trait]
impl Transport for HttpClient {
    async fn execute(&self, request: &RequestDescriptor) -> SerpResult<RawResponse> {
        log::debug!(
            "{} {}",
            request.method,
            request.redacted_url(&self.base_url)
        );

        let builder = match request.method {
            HttpMethod::Get => self.client.get(request.url(&self.base_url)?),
            HttpMethod::Post => self
                .client
                .post(request.endpoint(&self.base_url)?)
                .form(&request.params),
        };
        let builder = match self.timeout {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };

        let response = builder.send().await.map_err(|e| self.map_error(e, None))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_error(e, Some(status.as_u16())))?;

        if !status.is_success() {
            log::warn!(
                "SerpApi responded with status {status} for {}",
                request.path
            );
        }

        Ok(RawResponse {
            status: status.as_u16(),
            body: body.to_vec(),
        })
    }
}
