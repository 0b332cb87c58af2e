//! Typed clients for the upstream APIs

use common::{UpstreamClient, UpstreamConfig, UpstreamResult};

use crate::models::profile::Profile;

pub mod tvmaze;

/// Media type GitHub expects for the v3 REST API
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Client for the GitHub users API
#[derive(Debug, Clone)]
pub struct GitHubClient {
    upstream: UpstreamClient,
}

impl GitHubClient {
    /// Create a new GitHub client
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        let config = config.with_accept(GITHUB_ACCEPT);
        Ok(Self {
            upstream: UpstreamClient::new(&config)?,
        })
    }

    /// Fetch a user's public profile
    pub async fn user(&self, username: &str) -> UpstreamResult<Profile> {
        self.upstream.fetch_json(&["users", username], &[]).await
    }
}
