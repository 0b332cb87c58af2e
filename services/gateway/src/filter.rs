//! Filters over the daily schedule
//!
//! Both filters are pure: the same entries and arguments always produce the
//! same output, and "nothing matched" is an empty list rather than an error.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use thiserror::Error;

use crate::models::schedule::ScheduleEntry;

/// Errors raised for invalid filter arguments
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("genre required")]
    GenreRequired,
}

/// Parse an `HH:MM` airtime
pub fn parse_airtime(airtime: &str) -> Option<NaiveTime> {
    if airtime.is_empty() {
        return None;
    }
    NaiveTime::parse_from_str(airtime, "%H:%M").ok()
}

/// Parse a `YYYY-MM-DD` airdate
pub fn parse_airdate(airdate: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(airdate, "%Y-%m-%d").ok()
}

/// Case-insensitive genre match; `wanted` must already be lowercase
pub fn genre_matches(genre: &str, wanted: &str) -> bool {
    let genre = genre.to_lowercase();
    genre == wanted || genre.contains(wanted)
}

/// Keep the entries whose show has at least one genre matching `genre`
pub fn by_genre(entries: Vec<ScheduleEntry>, genre: &str) -> Result<Vec<ScheduleEntry>, FilterError> {
    let wanted = genre.trim().to_lowercase();
    if wanted.is_empty() {
        return Err(FilterError::GenreRequired);
    }

    Ok(entries
        .into_iter()
        .filter(|entry| entry.show.genres.iter().any(|g| genre_matches(g, &wanted)))
        .collect())
}

/// Start and end of a slot as `[start, end)`
///
/// The airtime is anchored to the entry's airdate, or to `fallback_date` when
/// the airdate is missing, so slots that run past midnight end on the next day.
pub fn airing_window(
    entry: &ScheduleEntry,
    fallback_date: NaiveDate,
) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let airtime = parse_airtime(&entry.airtime)?;
    let date = parse_airdate(&entry.airdate).unwrap_or(fallback_date);

    let start = date.and_time(airtime);
    let end = start + TimeDelta::minutes(i64::from(entry.runtime_minutes()));

    Some((start, end))
}

/// Whether the entry is on air at `now`; entries without an airdate are
/// taken to air on `schedule_date`
pub fn is_airing(entry: &ScheduleEntry, schedule_date: NaiveDate, now: NaiveDateTime) -> bool {
    match airing_window(entry, schedule_date) {
        Some((start, end)) => start <= now && now < end,
        None => false,
    }
}

/// Keep the entries of `schedule_date`'s schedule that are on air at `now`
pub fn airing_at(
    entries: Vec<ScheduleEntry>,
    schedule_date: NaiveDate,
    now: NaiveDateTime,
) -> Vec<ScheduleEntry> {
    entries
        .into_iter()
        .filter(|entry| is_airing(entry, schedule_date, now))
        .collect()
}

/// Keep the entries of today's schedule that are on air at `now`
pub fn now_playing(entries: Vec<ScheduleEntry>, now: NaiveDateTime) -> Vec<ScheduleEntry> {
    airing_at(entries, now.date(), now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::schedule::{EpisodeSummary, ShowSummary};

    fn entry(id: u64, airdate: &str, airtime: &str, genres: &[&str]) -> ScheduleEntry {
        ScheduleEntry {
            id,
            airdate: airdate.to_string(),
            airtime: airtime.to_string(),
            show: ShowSummary {
                id: id * 10,
                name: format!("Show {id}"),
                genres: genres.iter().map(|g| g.to_string()).collect(),
                ..ShowSummary::default()
            },
            ..ScheduleEntry::default()
        }
    }

    fn at(date: &str, time: &str) -> NaiveDateTime {
        parse_airdate(date).unwrap().and_time(parse_airtime(time).unwrap())
    }

    fn sample() -> Vec<ScheduleEntry> {
        vec![
            entry(1, "2024-05-01", "10:00", &["Drama", "Crime"]),
            entry(2, "2024-05-01", "11:00", &["Science-Fiction"]),
            entry(3, "2024-05-01", "12:00", &["Sports"]),
            entry(4, "2024-05-01", "", &[]),
            entry(5, "2024-05-01", "13:00", &["Comedy", "Drama"]),
        ]
    }

    #[test]
    fn test_parse_airtime() {
        assert_eq!(parse_airtime("20:30"), NaiveTime::from_hms_opt(20, 30, 0));
        assert_eq!(parse_airtime("00:00"), NaiveTime::from_hms_opt(0, 0, 0));
        assert_eq!(parse_airtime(""), None);
        assert_eq!(parse_airtime("25:00"), None);
        assert_eq!(parse_airtime("8pm"), None);
        assert_eq!(parse_airtime("20:30:00"), None);
    }

    #[test]
    fn test_genre_filter_is_case_insensitive() {
        let ids: Vec<u64> = by_genre(sample(), "dRaMa").unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 5]);
    }

    #[test]
    fn test_genre_filter_matches_substrings() {
        let ids: Vec<u64> = by_genre(sample(), "fiction").unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_genre_filter_returns_subset_with_matching_genre() {
        for genre in ["Drama", "sci", "SPORTS", "o", "Horror"] {
            let input = sample();
            let filtered = by_genre(input.clone(), genre).unwrap();
            let wanted = genre.to_lowercase();

            for kept in &filtered {
                assert!(input.contains(kept));
                assert!(kept.show.genres.iter().any(|g| g.to_lowercase().contains(&wanted)));
            }
        }
    }

    #[test]
    fn test_genre_filter_without_match_is_empty() {
        assert!(by_genre(sample(), "Horror").unwrap().is_empty());
        assert!(by_genre(vec![], "Drama").unwrap().is_empty());
    }

    #[test]
    fn test_genre_filter_requires_genre() {
        assert_eq!(by_genre(sample(), ""), Err(FilterError::GenreRequired));
        assert_eq!(by_genre(sample(), "   "), Err(FilterError::GenreRequired));
    }

    #[test]
    fn test_genre_filter_is_idempotent() {
        let first = by_genre(sample(), "drama").unwrap();
        let second = by_genre(sample(), "drama").unwrap();
        assert_eq!(first, second);
        assert_eq!(by_genre(first.clone(), "drama").unwrap(), first);
    }

    #[test]
    fn test_now_playing_window_boundaries() {
        let slot = vec![entry(1, "2024-05-01", "10:00", &[])];

        assert_eq!(now_playing(slot.clone(), at("2024-05-01", "10:00")).len(), 1);
        assert_eq!(now_playing(slot.clone(), at("2024-05-01", "10:59")).len(), 1);
        assert!(now_playing(slot.clone(), at("2024-05-01", "09:59")).is_empty());
        assert!(now_playing(slot, at("2024-05-01", "11:00")).is_empty());
    }

    #[test]
    fn test_now_playing_skips_missing_or_bad_airtime() {
        let entries = vec![
            entry(1, "2024-05-01", "", &[]),
            entry(2, "2024-05-01", "soon", &[]),
            entry(3, "2024-05-01", "24:10", &[]),
        ];

        for time in ["00:00", "10:00", "23:59"] {
            assert!(now_playing(entries.clone(), at("2024-05-01", time)).is_empty());
        }
    }

    #[test]
    fn test_now_playing_uses_episode_runtime() {
        let mut long = entry(1, "2024-05-01", "10:00", &[]);
        long.episode = Some(EpisodeSummary {
            runtime: Some(120),
            ..EpisodeSummary::default()
        });
        let mut short = entry(2, "2024-05-01", "10:00", &[]);
        short.runtime = Some(30);

        let ids: Vec<u64> = now_playing(vec![long, short], at("2024-05-01", "10:45"))
            .iter()
            .map(|e| e.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_now_playing_crosses_midnight() {
        let mut late = entry(1, "2024-05-01", "23:30", &[]);
        late.runtime = Some(90);
        let slot = vec![late];

        assert_eq!(now_playing(slot.clone(), at("2024-05-01", "23:45")).len(), 1);
        assert_eq!(now_playing(slot.clone(), at("2024-05-02", "00:30")).len(), 1);
        assert!(now_playing(slot.clone(), at("2024-05-02", "01:00")).is_empty());
        // Same clock time on the airdate itself is before the slot starts.
        assert!(now_playing(slot, at("2024-05-01", "00:30")).is_empty());
    }

    #[test]
    fn test_now_playing_without_airdate_uses_current_date() {
        let slot = vec![entry(1, "", "10:00", &[])];
        assert_eq!(now_playing(slot.clone(), at("2030-01-15", "10:30")).len(), 1);
        assert!(now_playing(slot, at("2030-01-15", "11:30")).is_empty());
    }

    #[test]
    fn test_airing_at_anchors_undated_entries_to_their_schedule() {
        let slot = vec![entry(1, "", "23:30", &[])];
        let previous_day = parse_airdate("2024-05-01").unwrap();

        assert_eq!(airing_at(slot.clone(), previous_day, at("2024-05-02", "00:15")).len(), 1);
        assert!(now_playing(slot, at("2024-05-02", "00:15")).is_empty());
    }

    #[test]
    fn test_now_playing_with_no_match_is_empty() {
        assert!(now_playing(sample(), at("2024-05-01", "03:00")).is_empty());
        assert!(now_playing(vec![], at("2024-05-01", "10:00")).is_empty());
    }
}
