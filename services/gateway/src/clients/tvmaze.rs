//! TVMaze client

use chrono::NaiveDate;
use common::{UpstreamClient, UpstreamConfig, UpstreamResult};
use serde_json::Value;

use crate::models::schedule::{ScheduleEntry, ShowSummary};

/// Client for the TVMaze schedule and show APIs
#[derive(Debug, Clone)]
pub struct TvMazeClient {
    upstream: UpstreamClient,
}

impl TvMazeClient {
    /// Create a new TVMaze client
    pub fn new(config: UpstreamConfig) -> UpstreamResult<Self> {
        Ok(Self {
            upstream: UpstreamClient::new(&config)?,
        })
    }

    /// Schedule of a country for one day
    pub async fn schedule(&self, country: &str, date: NaiveDate) -> UpstreamResult<Vec<ScheduleEntry>> {
        let date = date.format("%Y-%m-%d").to_string();
        self.upstream
            .fetch_json(&["schedule"], &[("country", country), ("date", date.as_str())])
            .await
    }

    /// Search shows by name; results are passed through untouched
    pub async fn search_shows(&self, query: &str) -> UpstreamResult<Vec<Value>> {
        self.upstream
            .fetch_json(&["search", "shows"], &[("q", query)])
            .await
    }

    /// Details of a single show
    pub async fn show(&self, id: &str) -> UpstreamResult<ShowSummary> {
        self.upstream.fetch_json(&["shows", id], &[]).await
    }
}
