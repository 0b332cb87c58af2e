//! Application state shared across handlers

use crate::services::{ProfileService, ScheduleService};

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub schedule_service: ScheduleService,
    pub profile_service: ProfileService,
}
