/// Application configuration module
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub nasa_api_url: String,
    pub nasa_api_key: String,
    pub bind_addr: String,
    pub proxy_base_url: String,
    pub request_timeout: Duration,
    pub assets_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let nasa_api_key = env::var("NASA_API_KEY").unwrap_or_else(|_| {
            tracing::warn!("NASA_API_KEY is not set, falling back to DEMO_KEY");
            "DEMO_KEY".to_string()
        });

        let nasa_api_url = env::var("NASA_API_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "https://api.nasa.gov".to_string());

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        let proxy_base_url = env::var("PROXY_BASE_URL")
            .map(|s| s.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());

        let request_timeout = Duration::from_secs(env_u64("REQUEST_TIMEOUT_SECONDS", 30));

        let assets_dir = env::var("ASSETS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("assets"));

        Ok(Self {
            nasa_api_url,
            nasa_api_key,
            bind_addr,
            proxy_base_url,
            request_timeout,
            assets_dir,
        })
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}
