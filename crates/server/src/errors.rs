use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::{ServiceError, StoreError};
use thiserror::Error;
use tracing::error;

/// Error body sent to clients: `{"error": <title>, "detail": <message>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({"error": self.title, "detail": self.detail});
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::MissingParam(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Missing Parameter", Some(err.to_string()))
            }
            ServiceError::InvalidParam(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid Parameter", Some(err.to_string()))
            }
            ServiceError::EntityNotFound { .. } => {
                Self::new(StatusCode::NOT_FOUND, "Entity Not Found", Some(err.to_string()))
            }
            ServiceError::Store(StoreError::NotFound) => {
                Self::new(StatusCode::NOT_FOUND, "Entity Not Found", Some(err.to_string()))
            }
            ServiceError::Store(store) => {
                // Driver messages stay in the log.
                error!(error = %store, cause = ?store, "storage failure");
                let detail = Some("DB Error".to_string());
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "DB Error", detail)
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
}
