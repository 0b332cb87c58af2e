//! Upstream HTTP client module
//!
//! This module provides a thin JSON client over `reqwest` for the third-party
//! REST APIs the gateway proxies. Each upstream gets one client, built once
//! at startup and cloned into request handlers.

use std::time::Duration;

use reqwest::{
    Client, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::error::{UpstreamError, UpstreamResult};

/// Configuration for one upstream API
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    /// Short name used in logs (e.g., "github")
    pub name: String,
    /// Base URL every request path is appended to
    pub base_url: String,
    /// Value of the `User-Agent` header; anonymous clients get rejected
    pub user_agent: String,
    /// Upper bound for a whole request, body included
    pub timeout: Duration,
    /// Optional `Accept` header sent with every request
    pub accept: Option<String>,
}

impl UpstreamConfig {
    /// Create a new UpstreamConfig without an `Accept` header
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            user_agent: user_agent.into(),
            timeout,
            accept: None,
        }
    }

    /// Send the given `Accept` header with every request
    pub fn with_accept(mut self, accept: impl Into<String>) -> Self {
        self.accept = Some(accept.into());
        self
    }
}

/// JSON client bound to a single upstream
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    name: String,
}

impl UpstreamClient {
    /// Build the underlying `reqwest::Client` from the configuration
    pub fn new(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            UpstreamError::Configuration(format!("{}: {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(UpstreamError::Configuration(format!(
                "{} cannot be used as a base URL",
                config.base_url
            )));
        }

        let mut headers = HeaderMap::new();
        if let Some(accept) = &config.accept {
            let value = HeaderValue::from_str(accept).map_err(|e| {
                UpstreamError::Configuration(format!("invalid Accept header {}: {}", accept, e))
            })?;
            headers.insert(ACCEPT, value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        info!(
            "{} client initialized with base URL: {} (timeout {:?})",
            config.name, base_url, config.timeout
        );

        Ok(Self {
            client,
            base_url,
            name: config.name.clone(),
        })
    }

    /// Build the full URL for a path below the base URL
    ///
    /// Each segment is percent-encoded on its own, so caller-supplied values
    /// such as usernames cannot escape their segment.
    pub fn endpoint_url(&self, segments: &[&str], query: &[(&str, &str)]) -> UpstreamResult<Url> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|_| {
                UpstreamError::Configuration(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    /// GET a JSON resource and decode it into `T`
    ///
    /// A single attempt is made. 404 maps to [`UpstreamError::NotFound`], any
    /// other non-200 status to [`UpstreamError::Status`].
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> UpstreamResult<T> {
        let url = self.endpoint_url(segments, query)?;
        debug!("Fetching {} resource: {}", self.name, url);

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status == StatusCode::NOT_FOUND {
            return Err(UpstreamError::NotFound(segments.join("/")));
        }

        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        debug!("Received {} bytes from {}", body.len(), self.name);

        serde_json::from_slice(&body).map_err(UpstreamError::Decode)
    }
}
