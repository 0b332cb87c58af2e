//! Gateway routes

use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, StatusCode, Uri},
    middleware,
    response::{Html, IntoResponse},
    routing::get,
};
use chrono::Local;
use serde_json::{Value, json};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};

use crate::{
    error::{ApiError, ApiResult},
    middleware::{logging_middleware, timeout_envelope},
    models::{
        CountryQuery, GenreQuery, NowPlayingResponse, ResponseEnvelope, SearchQuery, ShowQuery,
        UserQuery,
        profile::Profile,
        schedule::{ScheduleEntry, ShowSummary},
    },
    services::country_or_default,
    state::AppState,
};

const DOCS_PAGE: &str = include_str!("docs.html");

/// Genres suggested on the info page
pub const KNOWN_GENRES: [&str; 13] = [
    "Sports",
    "Drama",
    "Comedy",
    "Action",
    "Thriller",
    "Horror",
    "Romance",
    "Science-Fiction",
    "Fantasy",
    "Mystery",
    "Crime",
    "Documentary",
    "News",
];

/// Create the router for the gateway service
pub fn create_router(state: AppState, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/docs", get(docs))
        .route("/schedule", get(schedule))
        .route("/search", get(search))
        .route("/show", get(show_details))
        .route("/genre", get(genre))
        .route("/now", get(now_playing))
        .route("/api", get(api_home))
        .route("/api/", get(api_home))
        .route("/api/user", get(get_user))
        .fallback(not_found)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(middleware::map_response(timeout_envelope))
        .layer(cors)
        .layer(middleware::from_fn(logging_middleware))
        .with_state(state)
}

/// Read a required query parameter, rejecting missing and blank values
fn required_param(value: Option<String>, usage: &str) -> ApiResult<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::Validation(usage.to_string()))
}

/// Service information
pub async fn home() -> impl IntoResponse {
    let now = Local::now();

    Json(json!({
        "message": "TV schedule gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "date": now.format("%Y-%m-%d").to_string(),
        "time": now.format("%H:%M").to_string(),
        "docs": "/docs",
        "endpoints": {
            "GET /": "Service information",
            "GET /docs": "Interactive documentation",
            "GET /schedule": "Today's schedule (default country: US)",
            "GET /schedule?country=BR": "Today's schedule in Brazil",
            "GET /search?q=NAME": "Search shows by name",
            "GET /show?id=ID": "Details of a show",
            "GET /genre?genre=GENRE": "Today's schedule filtered by genre",
            "GET /now": "What is on air right now",
            "GET /api/user?username=USER": "GitHub user profile"
        },
        "examples": [
            "/docs",
            "/schedule",
            "/schedule?country=BR",
            "/search?q=friends",
            "/show?id=431",
            "/genre?genre=Sports&country=US",
            "/genre?genre=Drama&country=BR",
            "/now?country=US",
            "/api/user?username=octocat"
        ],
        "genres": KNOWN_GENRES
    }))
}

/// HTML documentation page
pub async fn docs() -> Html<String> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    Html(DOCS_PAGE.replace("{{DATE}}", &today))
}

/// Today's schedule
pub async fn schedule(
    State(state): State<AppState>,
    query: Result<Query<CountryQuery>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<Vec<ScheduleEntry>>>> {
    let Query(query) = query?;
    let country = country_or_default(query.country);
    let schedule = state.schedule_service.today_schedule(&country).await?;

    Ok(Json(ResponseEnvelope::list(schedule)))
}

/// Show search
pub async fn search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<Vec<Value>>>> {
    let Query(query) = query?;
    let q = required_param(query.q, "Parameter 'q' is required. Use: /search?q=NAME")?;
    let results = state.schedule_service.search_shows(&q).await?;

    Ok(Json(ResponseEnvelope::list(results)))
}

/// Show details
pub async fn show_details(
    State(state): State<AppState>,
    query: Result<Query<ShowQuery>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<ShowSummary>>> {
    let Query(query) = query?;
    let id = required_param(query.id, "Parameter 'id' is required. Use: /show?id=123")?;
    let show = state.schedule_service.show(&id).await?;

    Ok(Json(ResponseEnvelope::ok(show)))
}

/// Today's schedule filtered by genre
pub async fn genre(
    State(state): State<AppState>,
    query: Result<Query<GenreQuery>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<Vec<ScheduleEntry>>>> {
    let Query(query) = query?;
    let genre = required_param(
        query.genre,
        "Parameter 'genre' is required. Use: /genre?genre=Sports&country=US",
    )?;
    let country = country_or_default(query.country);
    let schedule = state.schedule_service.by_genre(&country, &genre).await?;

    Ok(Json(ResponseEnvelope::list(schedule)))
}

/// What is on air right now
pub async fn now_playing(
    State(state): State<AppState>,
    query: Result<Query<CountryQuery>, QueryRejection>,
) -> ApiResult<Json<NowPlayingResponse>> {
    let Query(query) = query?;
    let country = country_or_default(query.country);
    let now = Local::now().naive_local();
    let playing = state.schedule_service.now_playing(&country, now).await?;

    Ok(Json(NowPlayingResponse {
        envelope: ResponseEnvelope::list(playing),
        current_time: now.format("%H:%M").to_string(),
        country,
    }))
}

/// Profile namespace information
pub async fn api_home() -> impl IntoResponse {
    Json(json!({
        "message": "GitHub user API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "GET /api/user?username=USER": "Public profile of a GitHub user"
        },
        "example": "/api/user?username=octocat"
    }))
}

/// GitHub user profile
pub async fn get_user(
    State(state): State<AppState>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> ApiResult<Json<ResponseEnvelope<Profile>>> {
    let Query(query) = query?;
    let username = required_param(
        query.username,
        "Parameter 'username' is required. Use: /api/user?username=USERNAME",
    )?;
    let profile = state.profile_service.user(&username).await?;

    Ok(Json(ResponseEnvelope::ok(profile)))
}

/// Unknown route
pub async fn not_found(uri: Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ResponseEnvelope::<()>::failure(format!(
            "route {} not found",
            uri.path()
        ))),
    )
}
