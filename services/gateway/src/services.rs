//! Services sitting between the HTTP handlers and the upstream clients

use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::info;

use crate::{
    clients::{GitHubClient, tvmaze::TvMazeClient},
    error::{ApiError, ApiResult},
    filter::{self, FilterError},
    models::{
        profile::Profile,
        schedule::{ScheduleEntry, ShowSummary},
    },
};

/// Country used when the caller does not name one
pub const DEFAULT_COUNTRY: &str = "US";

/// Resolve an optional country parameter
pub fn country_or_default(country: Option<String>) -> String {
    country
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_COUNTRY.to_string())
}

fn require<'a>(value: &'a str, message: &str) -> ApiResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::Validation(message.to_string()));
    }
    Ok(value)
}

/// Schedule, search and show lookups backed by TVMaze
#[derive(Debug, Clone)]
pub struct ScheduleService {
    client: TvMazeClient,
}

impl ScheduleService {
    /// Create a new schedule service
    pub fn new(client: TvMazeClient) -> Self {
        Self { client }
    }

    /// Today's schedule, using the server's local date
    pub async fn today_schedule(&self, country: &str) -> ApiResult<Vec<ScheduleEntry>> {
        self.schedule_for(country, Local::now().date_naive()).await
    }

    /// Schedule of a country for the given day
    pub async fn schedule_for(&self, country: &str, date: NaiveDate) -> ApiResult<Vec<ScheduleEntry>> {
        info!("Fetching schedule for {} on {}", country, date);
        Ok(self.client.schedule(country, date).await?)
    }

    /// Search shows by name
    pub async fn search_shows(&self, query: &str) -> ApiResult<Vec<Value>> {
        let query = require(query, "query cannot be empty")?;
        Ok(self.client.search_shows(query).await?)
    }

    /// Details of a single show
    pub async fn show(&self, id: &str) -> ApiResult<ShowSummary> {
        let id = require(id, "id cannot be empty")?;
        Ok(self.client.show(id).await?)
    }

    /// Today's schedule restricted to one genre
    pub async fn by_genre(&self, country: &str, genre: &str) -> ApiResult<Vec<ScheduleEntry>> {
        if genre.trim().is_empty() {
            return Err(FilterError::GenreRequired.into());
        }

        let schedule = self.today_schedule(country).await?;
        let total = schedule.len();
        let filtered = filter::by_genre(schedule, genre)?;

        info!("Genre {} matched {} of {} entries", genre, filtered.len(), total);
        Ok(filtered)
    }

    /// Entries on air at `now`
    ///
    /// Late slots of the previous day can still be running after midnight,
    /// so both that day's schedule and today's are checked.
    pub async fn now_playing(&self, country: &str, now: NaiveDateTime) -> ApiResult<Vec<ScheduleEntry>> {
        let today = now.date();
        let mut playing = Vec::new();

        if let Some(yesterday) = today.pred_opt() {
            let (previous, current) = tokio::try_join!(
                self.schedule_for(country, yesterday),
                self.schedule_for(country, today)
            )?;
            playing.extend(filter::airing_at(previous, yesterday, now));
            playing.extend(filter::now_playing(current, now));
        } else {
            let current = self.schedule_for(country, today).await?;
            playing.extend(filter::now_playing(current, now));
        }

        let mut seen = HashSet::new();
        playing.retain(|entry| seen.insert(entry.id));

        Ok(playing)
    }
}

/// Developer profile lookups backed by GitHub
#[derive(Debug, Clone)]
pub struct ProfileService {
    client: GitHubClient,
}

impl ProfileService {
    /// Create a new profile service
    pub fn new(client: GitHubClient) -> Self {
        Self { client }
    }

    /// Public profile of a user
    pub async fn user(&self, username: &str) -> ApiResult<Profile> {
        let username = require(username, "username cannot be empty")?;
        Ok(self.client.user(username).await?)
    }
}
