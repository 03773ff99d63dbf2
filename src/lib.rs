pub mod api;
pub mod clients;
pub mod config;
pub mod domain;
pub mod errors;
pub mod form;
pub mod handlers;
pub mod render;
pub mod routes;
pub mod tabs;
pub mod utils;
pub mod view;

use crate::api::DashboardClient;
use crate::clients::NasaClient;
use crate::config::AppConfig;
use crate::domain::RoverStore;
use crate::handlers::AppState;
use crate::render::Dashboard;
use anyhow::Context;
use std::sync::Arc;

pub use routes::build_router;

/// Wire clients and the dashboard renderer from configuration
pub fn build_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let nasa_client = NasaClient::new(
        config.nasa_api_url.clone(),
        config.nasa_api_key.clone(),
        config.request_timeout,
    )
    .context("failed to build NASA client")?;

    let dashboard_client =
        DashboardClient::new(config.proxy_base_url.clone(), config.request_timeout)
            .context("failed to build dashboard client")?;

    let store = RoverStore::default().with_available_images(&config.assets_dir);
    let dashboard = Dashboard::new(Arc::new(dashboard_client), store);

    Ok(AppState {
        nasa_client: Arc::new(nasa_client),
        dashboard: Arc::new(dashboard),
    })
}
