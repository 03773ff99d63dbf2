/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Failure of a dashboard call through the proxy
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Connection refused, timeout, or the body could not be read
    #[error("API Call encounters unexpected error: {0}")]
    NetworkFailure(String),
    #[error("API Call encounters unexpected error: HTTP {0} Code")]
    UpstreamStatus(u16),
    /// Body arrived but is not the JSON shape the dashboard expects
    #[error("API Call encounters unexpected error: {0}")]
    MalformedResponse(String),
}

impl ApiError {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::MalformedResponse(err.to_string())
        } else {
            ApiError::NetworkFailure(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::MalformedResponse(err.to_string())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body relayed to the browser by the proxy routes
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Failure while forwarding a request to NASA
#[derive(Debug)]
pub struct ProxyError {
    pub message: String,
}

impl ProxyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ProxyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ProxyError {}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        ProxyError::new(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type ProxyResult<T> = Result<T, ProxyError>;
