/// Dashboard-side client for the proxy routes
use crate::clients::HttpClient;
use crate::domain::{ApodRecord, ManifestSummary, PhotoRecord, QueryConditions};
use crate::errors::{ApiError, ApiResult};
use crate::utils::today_string;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

pub struct DashboardClient {
    http_client: HttpClient,
    base_url: String,
}

impl DashboardClient {
    pub fn new(base_url: String, timeout: Duration) -> reqwest::Result<Self> {
        Ok(Self {
            http_client: HttpClient::new(timeout)?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json(&self, url: String) -> ApiResult<Value> {
        debug!("GET {}", url);
        let resp = self.http_client.get_client().get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::UpstreamStatus(status.as_u16()));
        }

        let body = resp.text().await?;
        let json = serde_json::from_str(&body)?;
        Ok(json)
    }

    /// Astronomy picture for today's date
    pub async fn get_image_of_the_day(&self) -> ApiResult<ApodRecord> {
        self.get_image_of_date(&today_string()).await
    }

    pub async fn get_image_of_date(&self, date: &str) -> ApiResult<ApodRecord> {
        let json = self
            .get_json(format!("{}/apod/{}", self.base_url, date))
            .await?;
        parse_apod(&json)
    }

    /// Manifest summary of a rover, name is matched case-insensitively
    pub async fn get_rover_info(&self, rover_name: &str) -> ApiResult<ManifestSummary> {
        let json = self
            .get_json(format!(
                "{}/manifests/{}",
                self.base_url,
                rover_name.to_lowercase()
            ))
            .await?;
        parse_manifest(&json)
    }

    pub async fn query_photos(&self, conditions: &QueryConditions) -> ApiResult<Vec<PhotoRecord>> {
        let json = self
            .get_json(format!(
                "{}/query?{}",
                self.base_url,
                conditions.to_query_string()
            ))
            .await?;
        parse_photos(&json)
    }
}

/// `{ "image": {...} }` envelope from the apod route
pub fn parse_apod(json: &Value) -> ApiResult<ApodRecord> {
    let image = json
        .get("image")
        .filter(|v| v.is_object())
        .ok_or_else(|| ApiError::MalformedResponse("missing image in APOD response".to_string()))?;
    let record = ApodRecord::deserialize(image)?;
    Ok(record)
}

/// `{ "manifest": { "photo_manifest": {...} } }` envelope from the manifest route
pub fn parse_manifest(json: &Value) -> ApiResult<ManifestSummary> {
    let photo_manifest = json
        .get("manifest")
        .and_then(|m| m.get("photo_manifest"))
        .filter(|v| v.is_object())
        .ok_or_else(|| {
            ApiError::MalformedResponse("missing photo_manifest in manifest response".to_string())
        })?;
    Ok(ManifestSummary::from_photo_manifest(photo_manifest))
}

/// `{ "response": { "photos": [...] } }` envelope from the query route.
/// A response without `photos` is an empty result.
pub fn parse_photos(json: &Value) -> ApiResult<Vec<PhotoRecord>> {
    let response = json.get("response").ok_or_else(|| {
        ApiError::MalformedResponse("missing response in photo query".to_string())
    })?;

    match response.get("photos") {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(PhotoRecord::from_value).collect(),
        Some(_) => Err(ApiError::MalformedResponse(
            "photos is not an array".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn photo(sol: i64, name: &str) -> Value {
        json!({
            "sol": sol,
            "camera": {"name": "X", "full_name": name},
            "img_src": format!("http://img/{}.jpg", sol),
            "earth_date": "2015-05-30"
        })
    }

    #[test]
    fn test_parse_photos_absent_key_is_empty() {
        let json = json!({"response": {"errors": "No Photos Found"}});
        assert_eq!(parse_photos(&json).unwrap(), Vec::new());
    }

    #[test]
    fn test_parse_photos_empty_array() {
        let json = json!({"response": {"photos": []}});
        assert!(parse_photos(&json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_photos_preserves_order_and_length() {
        let json = json!({"response": {"photos": [
            photo(3, "Mast Camera"),
            photo(1, "Navigation Camera"),
            photo(2, "Chemistry and Camera Complex")
        ]}});
        let photos = parse_photos(&json).unwrap();
        assert_eq!(photos.len(), 3);
        assert_eq!(
            photos.iter().map(|p| p.sol).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
        assert_eq!(photos[1].camera, "Navigation Camera");
        assert_eq!(photos[0].src, "http://img/3.jpg");
    }

    #[test]
    fn test_parse_photos_without_response_is_malformed() {
        assert!(matches!(
            parse_photos(&json!({"message": "x"})),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_manifest_missing_field() {
        let json = json!({"manifest": {"photo_manifest": {
            "landing_date": "2012-08-06",
            "launch_date": "2011-11-26",
            "status": "active",
            "max_date": "2024-02-19",
            "total_photos": 10
        }}});
        let summary = parse_manifest(&json).unwrap();
        assert!(summary.max_sol.is_none());
        assert_eq!(summary.total_photos, Some(json!(10)));
    }

    #[test]
    fn test_parse_manifest_error_body_is_malformed() {
        let json = json!({"manifest": {"errors": "Invalid Rover Name"}});
        assert!(matches!(
            parse_manifest(&json),
            Err(ApiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_parse_apod() {
        let json = json!({"image": {
            "media_type": "image",
            "url": "https://apod.nasa.gov/a.jpg",
            "title": "Galaxy",
            "explanation": "Far away",
            "date": "2021-03-07"
        }});
        let apod = parse_apod(&json).unwrap();
        assert_eq!(apod.title, "Galaxy");
        assert_eq!(apod.date.as_deref(), Some("2021-03-07"));
        assert!(!apod.is_video());
    }

    #[test]
    fn test_parse_apod_without_image() {
        assert!(parse_apod(&json!({"message": "nope"})).is_err());
    }
}
