use anyhow::Result;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod clients;
mod config;
mod error;
mod filter;
mod lifecycle;
mod middleware;
mod models;
mod routes;
mod services;
mod state;

use crate::{
    clients::{GitHubClient, tvmaze::TvMazeClient},
    config::GatewayConfig,
    lifecycle::Server,
    services::{ProfileService, ScheduleService},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting gateway service");

    let config = GatewayConfig::from_env()?;

    // Initialize upstream clients
    let github_client = GitHubClient::new(config.github_upstream())?;
    let tvmaze_client = TvMazeClient::new(config.tvmaze_upstream())?;

    let app_state = AppState {
        schedule_service: ScheduleService::new(tvmaze_client),
        profile_service: ProfileService::new(github_client),
    };

    info!("Gateway service initialized successfully");

    // Start the web server
    let app = routes::create_router(app_state, config.request_timeout());

    let server = Server::bind(config.bind_addr()?, app, config.shutdown_grace()).await?;
    server.run(lifecycle::shutdown_signal()).await?;

    Ok(())
}
