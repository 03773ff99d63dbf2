/// Domain models for the application
use crate::errors::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use tracing::warn;

/// Static rover metadata shown on the rovers tab
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rover {
    pub name: &'static str,
    /// Picture path relative to the assets directory
    pub image: Option<&'static str>,
    pub description: &'static str,
}

/// Everything the dashboard knows before any API call
#[derive(Debug, Clone)]
pub struct RoverStore {
    pub user_name: String,
    pub rovers: Vec<Rover>,
}

impl Default for RoverStore {
    fn default() -> Self {
        Self {
            user_name: "Guest".to_string(),
            rovers: vec![
                Rover {
                    name: "Curiosity",
                    image: Some("img/Curiosity.jpg"),
                    description: "Curiosity is a car-sized rover designed to explore Gale Crater on Mars as part of NASA's Mars Science Laboratory mission.",
                },
                Rover {
                    name: "Opportunity",
                    image: Some("img/Opportunity.jpg"),
                    description: "Opportunity, also known as MER-B or MER-1, and nicknamed \"Oppy\", is a robotic rover that was active on Mars from 2004 until the middle of 2018",
                },
                Rover {
                    name: "Spirit",
                    image: Some("img/Spirit.jpg"),
                    description: "Spirit, also known as MER-A or MER-2, is a robotic rover on Mars, active from 2004 to 2010. It was one of two rovers of NASA's Mars Exploration Rover Mission",
                },
            ],
        }
    }
}

impl RoverStore {
    /// Forget rover pictures that are not present under `assets_dir`
    pub fn with_available_images(mut self, assets_dir: &Path) -> Self {
        for rover in &mut self.rovers {
            if let Some(image) = rover.image {
                if !assets_dir.join(image).is_file() {
                    warn!(
                        "no picture for {} at {}",
                        rover.name,
                        assets_dir.join(image).display()
                    );
                    rover.image = None;
                }
            }
        }
        self
    }
}

/// Manifest attributes shown per rover, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManifestField {
    LandingDate,
    LaunchDate,
    Status,
    MaxSol,
    MaxDate,
    TotalPhotos,
}

impl ManifestField {
    pub const ALL: [ManifestField; 6] = [
        ManifestField::LandingDate,
        ManifestField::LaunchDate,
        ManifestField::Status,
        ManifestField::MaxSol,
        ManifestField::MaxDate,
        ManifestField::TotalPhotos,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestField::LandingDate => "landing_date",
            ManifestField::LaunchDate => "launch_date",
            ManifestField::Status => "status",
            ManifestField::MaxSol => "max_sol",
            ManifestField::MaxDate => "max_date",
            ManifestField::TotalPhotos => "total_photos",
        }
    }
}

impl fmt::Display for ManifestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The six manifest values extracted for one rover
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestSummary {
    pub landing_date: Option<Value>,
    pub launch_date: Option<Value>,
    pub status: Option<Value>,
    pub max_sol: Option<Value>,
    pub max_date: Option<Value>,
    pub total_photos: Option<Value>,
}

impl ManifestSummary {
    /// Extract from a `photo_manifest` object; sibling fields are ignored
    pub fn from_photo_manifest(manifest: &Value) -> Self {
        let pick = |field: ManifestField| manifest.get(field.as_str()).cloned();
        Self {
            landing_date: pick(ManifestField::LandingDate),
            launch_date: pick(ManifestField::LaunchDate),
            status: pick(ManifestField::Status),
            max_sol: pick(ManifestField::MaxSol),
            max_date: pick(ManifestField::MaxDate),
            total_photos: pick(ManifestField::TotalPhotos),
        }
    }

    pub fn get(&self, field: ManifestField) -> Option<&Value> {
        match field {
            ManifestField::LandingDate => self.landing_date.as_ref(),
            ManifestField::LaunchDate => self.launch_date.as_ref(),
            ManifestField::Status => self.status.as_ref(),
            ManifestField::MaxSol => self.max_sol.as_ref(),
            ManifestField::MaxDate => self.max_date.as_ref(),
            ManifestField::TotalPhotos => self.total_photos.as_ref(),
        }
    }
}

/// One rover photo from a query result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRecord {
    pub sol: i64,
    pub camera: String,
    pub src: String,
    pub earth_date: String,
}

#[derive(Deserialize)]
struct RawCamera {
    full_name: String,
}

#[derive(Deserialize)]
struct RawPhoto {
    sol: i64,
    camera: RawCamera,
    img_src: String,
    earth_date: String,
}

impl PhotoRecord {
    pub fn from_value(value: &Value) -> ApiResult<Self> {
        let raw = RawPhoto::deserialize(value)
            .map_err(|e| ApiError::MalformedResponse(format!("invalid photo entry: {}", e)))?;
        Ok(Self {
            sol: raw.sol,
            camera: raw.camera.full_name,
            src: raw.img_src,
            earth_date: raw.earth_date,
        })
    }
}

/// Cameras selectable in the search form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Camera {
    Fhaz,
    Rhaz,
    Mast,
    Chemcam,
    Mahli,
    Mardi,
    Navcam,
    Pancam,
    Minites,
}

impl Camera {
    pub const ALL: [Camera; 9] = [
        Camera::Fhaz,
        Camera::Rhaz,
        Camera::Mast,
        Camera::Chemcam,
        Camera::Mahli,
        Camera::Mardi,
        Camera::Navcam,
        Camera::Pancam,
        Camera::Minites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Camera::Fhaz => "FHAZ",
            Camera::Rhaz => "RHAZ",
            Camera::Mast => "MAST",
            Camera::Chemcam => "CHEMCAM",
            Camera::Mahli => "MAHLI",
            Camera::Mardi => "MARDI",
            Camera::Navcam => "NAVCAM",
            Camera::Pancam => "PANCAM",
            Camera::Minites => "MINITES",
        }
    }
}

/// Photo search parameters, kept in insertion order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConditions {
    pairs: Vec<(&'static str, String)>,
}

impl QueryConditions {
    pub fn new(rover_name: impl Into<String>) -> Self {
        Self {
            pairs: vec![("roverName", rover_name.into())],
        }
    }

    pub fn with_earth_date(self, earth_date: impl Into<String>) -> Self {
        self.with("earthDate", earth_date.into())
    }

    pub fn with_sol(self, sol: impl Into<String>) -> Self {
        self.with("sol", sol.into())
    }

    pub fn with_camera(self, camera: impl Into<String>) -> Self {
        self.with("camera", camera.into())
    }

    fn with(mut self, key: &'static str, value: String) -> Self {
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some(pair) => pair.1 = value,
            None => self.pairs.push((key, value)),
        }
        self
    }

    fn lookup(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn rover_name(&self) -> &str {
        self.lookup("roverName").unwrap_or_default()
    }

    pub fn camera(&self) -> Option<&str> {
        self.lookup("camera")
    }

    pub fn sol(&self) -> Option<&str> {
        self.lookup("sol")
    }

    pub fn earth_date(&self) -> Option<&str> {
        self.lookup("earthDate")
    }

    pub fn keys(&self) -> Vec<&'static str> {
        self.pairs.iter().map(|(k, _)| *k).collect()
    }

    /// `key=value` pairs joined by `&`, values are not percent-encoded
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Astronomy Picture of the Day
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApodRecord {
    #[serde(default)]
    pub media_type: Option<String>,
    pub url: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub explanation: String,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ApodRecord {
    /// Video when tagged so, or when the URL mentions youtube
    pub fn is_video(&self) -> bool {
        self.media_type.as_deref() == Some("video") || self.url.contains("youtube")
    }
}

/// Query string accepted by the proxy's photo route
#[derive(Debug, Clone, Default)]
pub struct PhotoQueryParams {
    pub rover_name: Option<String>,
    pub camera: Option<String>,
    pub sol: Option<String>,
    pub earth_date: Option<String>,
}

impl PhotoQueryParams {
    /// Pick the known keys out of a raw query map; a repeated key keeps its last value
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        Self {
            rover_name: params.get("roverName").cloned(),
            camera: params.get("camera").cloned(),
            sol: params.get("sol").cloned(),
            earth_date: params.get("earthDate").cloned(),
        }
    }
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}
