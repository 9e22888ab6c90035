use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// JSON error envelope returned by every handler: `{"error": .., "detail": ..}`.
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
            ServiceError::Model(_) => Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(e.to_string())),
            ServiceError::NotFound(msg) => Self::new(StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ServiceError::Conflict(msg) => Self::new(StatusCode::CONFLICT, "Conflict", Some(msg)),
            ServiceError::Storage(msg) => {
                error!(err = %msg, "storage failure");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", None)
            }
        }
    }
}

/// Body decode failures keep axum's status (422 for missing or mistyped
/// fields, 400 for malformed JSON, 415 for a wrong content type).
impl From<JsonRejection> for JsonApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), "Validation Error", Some(rejection.body_text()))
    }
}

impl From<PathRejection> for JsonApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Validation Error", Some(rejection.body_text()))
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("cannot bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
