use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use models::errors::ModelError;
use service::{auth::errors::AuthError, errors::ServiceError};
use thiserror::Error;
use tracing::error;

/// JSON error body: `{"error": <title>, "detail": <detail?>}`.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub title: &'static str,
    pub detail: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<&'a str>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &'static str, detail: Option<String>) -> Self {
        Self { status, title, detail }
    }

    pub fn not_found(what: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{what} not found")))
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some("provider login required".into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody { error: self.title, detail: self.detail.as_deref() };
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            ServiceError::Model(ModelError::IdsExhausted) => {
                JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(e.to_string()))
            }
            ServiceError::Model(_) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(e.to_string())),
            _ => {
                error!(err = %e, "request failed");
                JsonApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", Some(e.to_string()))
            }
        }
    }
}

impl From<AuthError> for JsonApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", Some(msg)),
            AuthError::Unauthorized => JsonApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized", Some(e.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("runtime check failed: {0}")]
    Runtime(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}
