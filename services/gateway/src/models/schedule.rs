//! TV schedule models

use serde::{Deserialize, Serialize};

use super::null_as_default;

/// Runtime assumed for a slot whose runtime is unknown or zero
pub const DEFAULT_RUNTIME_MINUTES: u32 = 60;

/// Poster image URLs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    #[serde(default, deserialize_with = "null_as_default")]
    pub medium: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub original: String,
}

/// Country a network broadcasts in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Country {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub code: String,
}

/// Broadcast network
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Network {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub country: Option<Country>,
}

/// Show summary embedded in schedule entries and returned by show details
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShowSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub show_type: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub premiered: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub image: Option<Image>,
    #[serde(default)]
    pub network: Option<Network>,
}

/// Episode details attached to a schedule entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub season: u32,
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub airdate: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub airtime: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default)]
    pub image: Option<Image>,
}

/// One broadcast slot of the daily schedule
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// `YYYY-MM-DD`
    #[serde(default, deserialize_with = "null_as_default")]
    pub airdate: String,
    /// `HH:MM`, empty when the slot has no fixed time
    #[serde(default, deserialize_with = "null_as_default")]
    pub airtime: String,
    #[serde(default)]
    pub runtime: Option<u32>,
    pub show: ShowSummary,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<EpisodeSummary>,
}

impl ScheduleEntry {
    /// Minutes this slot occupies
    ///
    /// Prefers the attached episode's runtime, then the slot's own, and falls
    /// back to [`DEFAULT_RUNTIME_MINUTES`]. Zero counts as unknown.
    pub fn runtime_minutes(&self) -> u32 {
        self.episode
            .as_ref()
            .and_then(|episode| episode.runtime)
            .filter(|minutes| *minutes > 0)
            .or(self.runtime.filter(|minutes| *minutes > 0))
            .unwrap_or(DEFAULT_RUNTIME_MINUTES)
    }
}
