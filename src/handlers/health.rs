//! Health check handlers (spec §6: `GET /health/alive`, `GET /health/ready`).

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub healthy: bool,
    pub details: String,
}

#[utoipa::path(
    get,
    path = "/health/alive",
    tag = "health",
    responses((status = 200, description = "Process is alive", body = HealthResponse))
)]
pub async fn alive() -> impl IntoResponse {
    let body = HealthResponse {
        healthy: true,
        details: "process running".to_string(),
    };
    (StatusCode::OK, Json(body))
}

#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "health",
    responses(
        (status = 200, description = "Ready to serve traffic", body = HealthResponse),
        (status = 503, description = "Not ready", body = HealthResponse),
    )
)]
pub async fn ready() -> impl IntoResponse {
    let body = HealthResponse {
        healthy: true,
        details: "no external dependencies to check".to_string(),
    };
    (StatusCode::OK, Json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn alive_reports_healthy() {
        let response = alive().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn ready_reports_healthy() {
        let response = ready().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
