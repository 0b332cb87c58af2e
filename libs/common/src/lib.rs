//! Common library for the TV schedule gateway
//!
//! This crate provides the functionality shared by the gateway services:
//! a JSON client for third-party REST APIs and the error taxonomy those
//! calls produce.

pub mod error;
pub mod http_client;

pub use error::{UpstreamError, UpstreamResult};
pub use http_client::{UpstreamClient, UpstreamConfig};

/// Example usage of the upstream client
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use common::{UpstreamClient, UpstreamConfig};
/// use serde_json::Value;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = UpstreamConfig::new(
///         "tvmaze",
///         "https://api.tvmaze.com",
///         "tvmaze-gateway",
///         Duration::from_secs(15),
///     );
///     let client = UpstreamClient::new(&config)?;
///     let show: Value = client.fetch_json(&["shows", "431"], &[]).await?;
///     println!("Fetched show: {}", show["name"]);
///     Ok(())
/// }
/// ```
pub fn example_usage() {}
