/// HTTP request handlers
use crate::clients::NasaClient;
use crate::domain::{Health, PhotoQueryParams};
use crate::errors::ProxyError;
use crate::form::{FormInput, Submission};
use crate::render::{Dashboard, UiState};
use crate::view::document;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::error;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub nasa_client: Arc<NasaClient>,
    pub dashboard: Arc<Dashboard>,
}

/// Health check handler
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok",
        now: Utc::now(),
    })
}

fn logged(route: &str, err: ProxyError) -> ProxyError {
    error!("{} proxy error: {}", route, err);
    err
}

/// Relay Astronomy Picture of the given day
pub async fn get_apod(
    Path(date): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ProxyError> {
    let image = state
        .nasa_client
        .fetch_apod(&date)
        .await
        .map_err(|e| logged("apod", e))?;
    Ok(Json(json!({ "image": image })))
}

/// Relay rover manifest
pub async fn get_manifest(
    Path(rover_name): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ProxyError> {
    let manifest = state
        .nasa_client
        .fetch_manifest(&rover_name)
        .await
        .map_err(|e| logged("manifests", e))?;
    Ok(Json(json!({ "manifest": manifest })))
}

/// Relay rover photo search
pub async fn query_photos(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Result<Json<Value>, ProxyError> {
    let params = PhotoQueryParams::from_query(&params);
    let response = state
        .nasa_client
        .fetch_photos(&params)
        .await
        .map_err(|e| logged("query", e))?;
    Ok(Json(json!({ "response": response })))
}

/// Query string of the dashboard page
#[derive(Debug, Default)]
pub struct DashboardQuery {
    pub tab: Option<String>,
    pub rover: Option<String>,
    pub submit: Option<String>,
    pub camera: Option<String>,
    pub sol: Option<String>,
    pub earth_date: Option<String>,
}

impl DashboardQuery {
    /// Unknown keys are ignored, a repeated key keeps its last value
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let get = |key: &str| params.get(key).cloned();
        Self {
            tab: get("tab"),
            rover: get("rover"),
            submit: get("submit"),
            camera: get("camera"),
            sol: get("sol"),
            earth_date: get("earthDate"),
        }
    }
}

impl From<DashboardQuery> for UiState {
    fn from(q: DashboardQuery) -> Self {
        let submission = q.submit.map(|button_id| Submission {
            button_id,
            input: FormInput {
                camera: q.camera,
                sol: q.sol,
                earth_date: q.earth_date,
            },
        });
        UiState {
            tab: q.tab,
            rover: q.rover,
            submission,
        }
    }
}

/// Dashboard page
pub async fn index(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<AppState>,
) -> Html<String> {
    let ui = UiState::from(DashboardQuery::from_query(&params));
    let body = state.dashboard.render(&ui).await;
    Html(document("Mars Dashboard", body))
}
