//! API models for request and response payloads

use serde::{Deserialize, Deserializer, Serialize};

use self::schedule::ScheduleEntry;

pub mod profile;
pub mod schedule;

/// Uniform JSON wrapper returned by every endpoint
///
/// `success == true` never carries an `error`; `success == false` never
/// carries `data`. Build values through [`ResponseEnvelope::ok`],
/// [`ResponseEnvelope::list`] and [`ResponseEnvelope::failure`].
#[derive(Debug, Clone, Serialize)]
pub struct ResponseEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl<T> ResponseEnvelope<T> {
    /// Successful response holding a single value
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            count: None,
        }
    }

    /// Failed response; an empty message is replaced so `error` is never blank
    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "unknown error".to_string()
        } else {
            error
        };

        Self {
            success: false,
            data: None,
            error: Some(error),
            count: None,
        }
    }
}

impl<T> ResponseEnvelope<Vec<T>> {
    /// Successful response holding a list, with `count` set to its length
    pub fn list(items: Vec<T>) -> Self {
        Self {
            success: true,
            count: Some(items.len()),
            data: Some(items),
            error: None,
        }
    }
}

/// Now-playing response: the envelope plus the clock it was computed against
#[derive(Debug, Clone, Serialize)]
pub struct NowPlayingResponse {
    #[serde(flatten)]
    pub envelope: ResponseEnvelope<Vec<ScheduleEntry>>,
    /// Server wall-clock time, `HH:MM`
    pub current_time: String,
    pub country: String,
}

/// Query parameters for routes that only take a country
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CountryQuery {
    /// ISO country code (default: US)
    pub country: Option<String>,
}

/// Query parameters for show search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Query parameters for show details
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowQuery {
    pub id: Option<String>,
}

/// Query parameters for the genre filter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenreQuery {
    pub genre: Option<String>,
    pub country: Option<String>,
}

/// Query parameters for the profile lookup
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    pub username: Option<String>,
}

/// Decode `null` as the type's default value
///
/// Upstream APIs send `null` for many text and numeric fields; we expose
/// those as empty strings and zeroes instead of failing the decode.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
