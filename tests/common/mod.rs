#![allow(dead_code)]

use mars_dashboard::config::AppConfig;
use mars_dashboard::{build_router, build_state};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use tokio::net::TcpListener;

pub const API_KEY: &str = "TEST_KEY";

/// Start the proxy on a random local port against a fake NASA upstream.
/// Returns the proxy base URL.
pub async fn spawn_app(nasa_uri: String) -> String {
    spawn_app_with_timeout(nasa_uri, Duration::from_secs(5)).await
}

pub async fn spawn_app_with_timeout(nasa_uri: String, request_timeout: Duration) -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind random port");
    let addr = listener.local_addr().expect("local addr");
    let base_url = format!("http://{}", addr);

    let config = AppConfig {
        nasa_api_url: nasa_uri,
        nasa_api_key: API_KEY.to_string(),
        bind_addr: addr.to_string(),
        proxy_base_url: base_url.clone(),
        request_timeout,
        assets_dir: PathBuf::from("assets"),
    };
    let state = build_state(&config).expect("build state");
    let app = build_router(state, &config.assets_dir);

    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("serve");
    });

    base_url
}

pub fn photo_manifest(name: &str) -> Value {
    json!({
        "photo_manifest": {
            "name": name,
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active",
            "max_sol": 4102,
            "max_date": "2024-02-19",
            "total_photos": 695670,
            "photos": []
        }
    })
}

pub fn photo(id: i64, sol: i64, camera: &str) -> Value {
    json!({
        "id": id,
        "sol": sol,
        "camera": {"id": 20, "name": "X", "rover_id": 5, "full_name": camera},
        "img_src": format!("http://mars.jpl.nasa.gov/msl-raw-images/{}.JPG", id),
        "earth_date": "2015-05-30",
        "rover": {"id": 5, "name": "Curiosity"}
    })
}
