//! `GET /metadata` (spec §6): justification hint, signed-in user email, app
//! version, and the default/max activation timeouts shown by the caller's
//! activation-duration picker.

use crate::app_state::AppState;
use crate::auth::Identity;
use axum::{Json, extract::State, response::IntoResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetadataResponse {
    pub justification_hint: String,
    pub signed_in_user: String,
    pub app_version: String,
    pub default_activation_timeout: i64,
    pub max_activation_timeout: i64,
}

#[utoipa::path(
    get,
    path = "/metadata",
    tag = "metadata",
    responses((status = 200, description = "Deployment metadata", body = MetadataResponse))
)]
pub async fn metadata(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> impl IntoResponse {
    Json(MetadataResponse {
        justification_hint: state.config.justification.hint.clone(),
        signed_in_user: user.as_str().to_string(),
        app_version: env!("CARGO_PKG_VERSION").to_string(),
        default_activation_timeout: state.config.activation.default_activation_minutes,
        max_activation_timeout: state.config.activation.max_activation_minutes,
    })
}
