//! Rolescope dashboard composition root.

#![forbid(unsafe_code)]

mod api_router;
mod dashboard_config;
mod dto;
mod error;
mod handlers;
mod page;
mod session_selection_store;
mod state;

use std::sync::Arc;

use rolescope_application::{DashboardService, DirectoryService};
use rolescope_core::AppError;
use rolescope_infrastructure::{
    ClientCredentialTokenProvider, GraphDirectoryClient, InMemoryDirectoryResponseCache,
};
use tracing::info;

use crate::dashboard_config::{DashboardConfig, init_tracing};
use crate::state::AppState;

const DASHBOARD_TITLE: &str = "Directory users and role assignments";

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = DashboardConfig::load()?;
    let address = config.socket_address()?;

    let mut http_client = reqwest::Client::builder();
    if let Some(timeout) = config.http_timeout {
        http_client = http_client.timeout(timeout);
    }
    let http_client = http_client
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

    let token_provider = Arc::new(ClientCredentialTokenProvider::new(
        http_client.clone(),
        &config.authority_host,
        config.graph_scope.clone(),
    )?);
    let directory_client = Arc::new(GraphDirectoryClient::new(
        http_client,
        &config.graph_base_url,
    )?);
    let directory_service = DirectoryService::new(directory_client).with_cache(
        Arc::new(InMemoryDirectoryResponseCache::new()),
        config.cache_ttl_seconds,
    );

    let app_state = AppState {
        dashboard_service: DashboardService::new(
            DASHBOARD_TITLE,
            config.credentials.clone(),
            token_provider,
            directory_service,
        ),
    };

    let app = api_router::build_router(
        app_state,
        api_router::build_session_layer(config.cookie_secure),
    );

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        cache_ttl_seconds = config.cache_ttl_seconds,
        "rolescope-dashboard listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("dashboard server error: {error}")))
}
