use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use service::{ErrorKind, ServiceError};
use thiserror::Error;
use tracing::error;

/// Plain-text HTTP failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
}

impl ApiError {
    pub const fn new(status: StatusCode, message: &'static str) -> Self { Self { status, message } }

    pub const fn invalid_id() -> Self { Self::new(StatusCode::BAD_REQUEST, "invalid id") }
    pub const fn invalid_body() -> Self { Self::new(StatusCode::BAD_REQUEST, "invalid body") }
    pub const fn internal() -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error") }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e.kind() {
            ErrorKind::NotFound => Self::new(StatusCode::NOT_FOUND, "product not found"),
            ErrorKind::AlreadyExists => Self::new(StatusCode::CONFLICT, "product already exists"),
            ErrorKind::FieldRequired | ErrorKind::FieldQuality => Self::invalid_body(),
            // type mismatches, bad dates and the rest are not reported as client errors
            _ => Self::internal(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status, message = self.message, "request failed");
        }
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("cannot load product seed: {0}")]
    Seed(#[from] service::storage::loader::LoadError),
    #[error("cannot bind {addr}: {source}")]
    Bind { addr: String, source: std::io::Error },
}
