mod common;

use common::{photo, photo_manifest, spawn_app, spawn_app_with_timeout, API_KEY};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn test_apod_wraps_upstream_body() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .and(query_param("date", "2021-03-07"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "media_type": "image",
            "url": "https://apod.nasa.gov/apod/image/a.jpg",
            "title": "Galaxy",
            "explanation": "Far away"
        })))
        .expect(1)
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/apod/2021-03-07", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["image"]["title"], "Galaxy");
}

#[tokio::test]
async fn test_apod_upstream_failure_is_500() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/planetary/apod"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"code": 400})))
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/apod/1990-01-01", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({"message": "Sorry, no data available today"}));
}

#[tokio::test]
async fn test_manifest_wraps_upstream_body() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/manifests/spirit"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(photo_manifest("Spirit")))
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let body: Value = Client::new()
        .get(format!("{}/manifests/spirit", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["manifest"]["photo_manifest"]["name"], "Spirit");
}

#[tokio::test]
async fn test_manifest_relays_upstream_error_json() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/manifests/pluto"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"errors": "Invalid Rover Name"})),
        )
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/manifests/pluto", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["manifest"]["errors"], "Invalid Rover Name");
}

#[tokio::test]
async fn test_manifest_non_json_upstream_is_500() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/manifests/spirit"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>bad gateway</html>"))
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/manifests/spirit", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_query_forwards_search_parameters() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .and(query_param("earth_date", "2015-05-30"))
        .and(query_param("sol", "1000"))
        .and(query_param("camera", "FHAZ"))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [photo(1, 1000, "Front Hazard Avoidance Camera")]
        })))
        .expect(1)
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let body: Value = Client::new()
        .get(format!(
            "{}/query?roverName=curiosity&earthDate=2015-05-30&sol=1000&camera=FHAZ",
            base
        ))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["response"]["photos"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_query_without_rover_is_500() {
    let nasa = MockServer::start().await;
    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/query?sol=10", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "roverName is required");
}

#[tokio::test]
async fn test_query_repeated_parameter_keeps_last_value() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/rovers/curiosity/photos"))
        .and(query_param("sol", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "photos": [photo(7, 2, "Mast Camera")]
        })))
        .expect(1)
        .mount(&nasa)
        .await;

    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/query?roverName=curiosity&sol=1&sol=2", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["response"]["photos"][0]["sol"], 2);
}

#[tokio::test]
async fn test_slow_upstream_is_500() {
    let nasa = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mars-photos/api/v1/manifests/spirit"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(photo_manifest("Spirit"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&nasa)
        .await;

    let base = spawn_app_with_timeout(nasa.uri(), Duration::from_millis(200)).await;
    let resp = Client::new()
        .get(format!("{}/manifests/spirit", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_page_renders_with_repeated_parameters() {
    let nasa = MockServer::start().await;
    let base = spawn_app(nasa.uri()).await;
    let resp = Client::new()
        .get(format!("{}/?tab=rovers&tab=apod", base))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await.unwrap();
    assert!(html.contains(r#"id="layoutButton-content-apod" style="display: block""#));
}

#[tokio::test]
async fn test_health() {
    let nasa = MockServer::start().await;
    let base = spawn_app(nasa.uri()).await;
    let body: Value = Client::new()
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
}
