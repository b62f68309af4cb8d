//! HTTP error mapping for the JIT access API (spec §7).

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jit_activator::ActivatorError;
use jit_catalog::CatalogError;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unauthenticated")]
    Unauthenticated,
    #[error("access denied: {0}")]
    AccessDenied(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("already exists: {0}")]
    AlreadyExists(String),
    #[error("service unavailable: {0}")]
    Unavailable(String),
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<ActivatorError> for ApiError {
    fn from(err: ActivatorError) -> Self {
        match err {
            ActivatorError::InvalidArgument(m) => ApiError::InvalidArgument(m),
            ActivatorError::AccessDenied(m) => ApiError::AccessDenied(m),
            ActivatorError::NotFound(m) => ApiError::NotFound(m),
            ActivatorError::AlreadyExists(m) => ApiError::AlreadyExists(m),
            ActivatorError::Unavailable(m) => ApiError::Unavailable(m),
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidArgument(m) => ApiError::InvalidArgument(m),
            CatalogError::AccessDenied(m) => ApiError::AccessDenied(m),
            CatalogError::NotFound(m) => ApiError::NotFound(m),
            CatalogError::Unavailable(m) => ApiError::Unavailable(m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "INVALID_ARGUMENT"),
            ApiError::Unauthenticated => (StatusCode::UNAUTHORIZED, "UNAUTHENTICATED"),
            ApiError::AccessDenied(_) => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::AlreadyExists(_) => (StatusCode::CONFLICT, "ALREADY_EXISTS"),
            ApiError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "UNAVAILABLE"),
            ApiError::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
            ),
        };

        match &self {
            ApiError::Configuration(_) | ApiError::Unavailable(_) => {
                tracing::error!("{}", self);
            }
            ApiError::AccessDenied(_) | ApiError::NotFound(_) | ApiError::Unauthenticated => {
                tracing::warn!("{}", self);
            }
            ApiError::InvalidArgument(_) | ApiError::AlreadyExists(_) => {
                tracing::debug!("{}", self);
            }
        }

        let body = Json(json!({
            "error": {
                "type": error_type,
                "message": self.to_string(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            }
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
