/// External API clients module
use crate::domain::PhotoQueryParams;
use crate::errors::{ProxyError, ProxyResult};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client wrapper with common configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("mars-dashboard/1.0")
            .build()?;
        Ok(Self { client })
    }

    pub fn get_client(&self) -> &Client {
        &self.client
    }
}

/// NASA APIs client (APOD, Mars Rover Photos)
pub struct NasaClient {
    http_client: HttpClient,
    base_url: String,
    api_key: String,
}

impl NasaClient {
    pub fn new(base_url: String, api_key: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url,
            api_key,
        })
    }

    pub fn apod_url(&self, date: &str) -> String {
        format!(
            "{}/planetary/apod?date={}&api_key={}",
            self.base_url, date, self.api_key
        )
    }

    pub fn manifest_url(&self, rover_name: &str) -> String {
        format!(
            "{}/mars-photos/api/v1/manifests/{}?api_key={}",
            self.base_url, rover_name, self.api_key
        )
    }

    /// Upstream photo search URL; parameters go in as received
    pub fn photos_url(&self, params: &PhotoQueryParams) -> ProxyResult<String> {
        let rover_name = params
            .rover_name
            .as_deref()
            .ok_or_else(|| ProxyError::new("roverName is required"))?;

        let mut query = Vec::new();
        if let Some(earth_date) = &params.earth_date {
            query.push(format!("earth_date={}", earth_date));
        }
        if let Some(sol) = &params.sol {
            query.push(format!("sol={}", sol));
        }
        if let Some(camera) = &params.camera {
            query.push(format!("camera={}", camera));
        }
        query.push(format!("api_key={}", self.api_key));

        Ok(format!(
            "{}/mars-photos/api/v1/rovers/{}/photos?{}",
            self.base_url,
            rover_name,
            query.join("&")
        ))
    }

    /// Fetch Astronomy Picture of the given day
    pub async fn fetch_apod(&self, date: &str) -> ProxyResult<Value> {
        let resp = self
            .http_client
            .get_client()
            .get(self.apod_url(date))
            .send()
            .await?;

        if !resp.status().is_success() {
            tracing::warn!("APOD request for {} failed with status {}", date, resp.status());
            return Err(ProxyError::new("Sorry, no data available today"));
        }

        let json = resp.json().await?;
        Ok(json)
    }

    /// Fetch mission manifest of a rover
    pub async fn fetch_manifest(&self, rover_name: &str) -> ProxyResult<Value> {
        let json = self
            .http_client
            .get_client()
            .get(self.manifest_url(rover_name))
            .send()
            .await?
            .json()
            .await?;
        Ok(json)
    }

    /// Fetch rover photos matching camera/sol/earth date
    pub async fn fetch_photos(&self, params: &PhotoQueryParams) -> ProxyResult<Value> {
        let url = self.photos_url(params)?;
        let json = self
            .http_client
            .get_client()
            .get(url)
            .send()
            .await?
            .json()
            .await?;
        Ok(json)
    }
}
