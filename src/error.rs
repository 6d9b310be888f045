use http::StatusCode;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum RummageError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Catalog store error: {0}")]
    Store(String),

    #[error("Request deadline exceeded during {0}")]
    DeadlineExceeded(String),

    #[error("JSON error: {0}")]
    Json(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RummageError>;

impl From<serde_json::Error> for RummageError {
    fn from(e: serde_json::Error) -> Self {
        RummageError::Json(e.to_string())
    }
}

impl RummageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RummageError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            RummageError::Unauthorized(_) => StatusCode::FORBIDDEN,
            RummageError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RummageError::DeadlineExceeded(_) => StatusCode::GATEWAY_TIMEOUT,
            RummageError::Json(_) => StatusCode::BAD_REQUEST,
            RummageError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Axum IntoResponse implementation (feature-gated)
#[cfg(feature = "axum-support")]
use axum::response::{IntoResponse, Json, Response};
#[cfg(feature = "axum-support")]
use serde::Serialize;

#[cfg(feature = "axum-support")]
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub message: String,
    pub request_id: String,
}

#[cfg(feature = "axum-support")]
impl IntoResponse for RummageError {
    fn into_response(self) -> Response {
        let (error_code, message) = match &self {
            RummageError::InvalidParameter(msg) => ("invalid_parameter", msg.clone()),
            RummageError::Unauthorized(msg) => ("unauthorized", msg.clone()),
            // Store internals stay out of client responses; the handler logs
            // the full error alongside the request parameters.
            RummageError::Store(_) => ("internal_error", "catalog store failure".to_string()),
            RummageError::DeadlineExceeded(op) => (
                "deadline_exceeded",
                format!("request deadline exceeded during {}", op),
            ),
            RummageError::Json(msg) => ("json_error", msg.clone()),
            RummageError::Config(msg) => ("config_error", msg.clone()),
        };

        let body = ErrorResponse {
            success: false,
            error: error_code.to_string(),
            message,
            request_id: format!("req_rm_{}", uuid::Uuid::new_v4()),
        };

        (self.status_code(), Json(body)).into_response()
    }
}
