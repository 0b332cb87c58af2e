//! Gateway configuration
//!
//! Settings come from environment variables (`PORT`, `TVMAZE_API_URL`, ...)
//! layered over built-in defaults.

use std::{net::SocketAddr, time::Duration};

use anyhow::{Context, Result, bail};
use common::UpstreamConfig;
use config::{Config, Environment, Map};
use serde::Deserialize;

/// Runtime configuration of the gateway
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Address to bind (default: 0.0.0.0)
    pub listen_host: String,
    /// Port to listen on (default: 8080)
    pub port: u16,
    /// GitHub REST API base URL
    pub github_api_url: String,
    /// TVMaze REST API base URL
    pub tvmaze_api_url: String,
    /// Identifying `User-Agent` sent upstream
    pub user_agent: String,
    /// Timeout for GitHub calls in seconds (default: 10)
    pub github_timeout_secs: u64,
    /// Timeout for TVMaze calls in seconds (default: 15)
    pub tvmaze_timeout_secs: u64,
    /// Time allowed to handle one request in seconds (default: 20); must be
    /// longer than both upstream timeouts
    pub request_timeout_secs: u64,
    /// Grace period for in-flight requests on shutdown in seconds (default: 30)
    pub shutdown_grace_secs: u64,
}

impl GatewayConfig {
    /// Create a new GatewayConfig from environment variables
    pub fn from_env() -> Result<Self> {
        Self::load(Environment::default())
    }

    /// Create a new GatewayConfig from explicit key/value pairs
    ///
    /// Keys use the environment variable names (e.g. `PORT`).
    pub fn from_map(vars: Map<String, String>) -> Result<Self> {
        Self::load(Environment::default().source(Some(vars)))
    }

    fn load(environment: Environment) -> Result<Self> {
        let settings = Config::builder()
            .set_default("listen_host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("github_api_url", "https://api.github.com")?
            .set_default("tvmaze_api_url", "https://api.tvmaze.com")?
            .set_default("user_agent", "tvmaze-gateway")?
            .set_default("github_timeout_secs", 10)?
            .set_default("tvmaze_timeout_secs", 15)?
            .set_default("request_timeout_secs", 20)?
            .set_default("shutdown_grace_secs", 30)?
            .add_source(environment.try_parsing(true))
            .build()
            .context("Failed to read gateway configuration")?;

        let config: Self = settings
            .try_deserialize()
            .context("Invalid gateway configuration")?;
        config.validate()?;

        Ok(config)
    }

    /// Every upstream timeout must be shorter than the request timeout
    fn validate(&self) -> Result<()> {
        let slowest_upstream = self.github_timeout_secs.max(self.tvmaze_timeout_secs);
        if self.request_timeout_secs <= slowest_upstream {
            bail!(
                "REQUEST_TIMEOUT_SECS ({}) must be greater than the upstream timeouts ({})",
                self.request_timeout_secs,
                slowest_upstream
            );
        }

        Ok(())
    }

    /// Socket address to bind the listener to
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.listen_host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.listen_host, self.port))
    }

    /// Upstream settings for the GitHub client
    pub fn github_upstream(&self) -> UpstreamConfig {
        UpstreamConfig::new(
            "github",
            self.github_api_url.clone(),
            self.user_agent.clone(),
            Duration::from_secs(self.github_timeout_secs),
        )
    }

    /// Upstream settings for the TVMaze client
    pub fn tvmaze_upstream(&self) -> UpstreamConfig {
        UpstreamConfig::new(
            "tvmaze",
            self.tvmaze_api_url.clone(),
            self.user_agent.clone(),
            Duration::from_secs(self.tvmaze_timeout_secs),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}
