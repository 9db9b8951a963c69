/// Unified error handling module
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Unified error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Client supplied an out-of-range or malformed request field.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// The USGS feed request failed or timed out.
    #[error("Upstream feed error: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The cache store could not be reached. The orchestrator downgrades
    /// this to a cache miss, so it only reaches the wire if the degraded
    /// path fails too.
    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "INVALID_INPUT", msg.clone()),
            ApiError::Upstream(e) => {
                // Surface the status class but not transport internals.
                let code = match e.status().map(|s| s.as_u16()) {
                    Some(400..=499) => "UPSTREAM_4XX",
                    Some(500..=599) => "UPSTREAM_5XX",
                    _ => "UPSTREAM_ERROR",
                };
                (
                    StatusCode::BAD_GATEWAY,
                    code,
                    "earthquake feed request failed".to_string(),
                )
            }
            ApiError::CacheUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "CACHE_UNAVAILABLE",
                "cache store unavailable".to_string(),
            ),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        let error_response = ErrorResponse {
            ok: false,
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(error_response)).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
