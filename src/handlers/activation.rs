//! `POST /projects/{id}/roles/self-activate`, `POST /projects/{id}/roles/request`,
//! `GET /activation-request`, `POST /activation-request/approve` (spec §6).

use crate::app_state::AppState;
use crate::auth::Identity;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use jit_kernel::{ProjectId, ProjectRole};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SelfActivateRequest {
    pub roles: Vec<String>,
    /// Minutes.
    pub duration: i64,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ActivationResponse {
    pub activation_id: String,
    pub start: String,
    pub end: String,
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/roles/self-activate",
    tag = "activation",
    responses((status = 200, description = "Access granted", body = ActivationResponse))
)]
pub async fn self_activate(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    Json(body): Json<SelfActivateRequest>,
) -> ApiResult<Json<ActivationResponse>> {
    let project = ProjectId::new(id).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    let [role_id] = <[String; 1]>::try_from(body.roles).map_err(|_| {
        ApiError::InvalidArgument("self-activate accepts exactly one role per call".to_string())
    })?;
    let project_role = ProjectRole::new(project.clone(), role_id);
    let ctx = state.catalog.create_context(user);

    let outcome = state
        .activator
        .create_self_request(
            &ctx,
            &project,
            &project_role,
            chrono::Duration::minutes(body.duration),
            &body.justification,
        )
        .await?;

    Ok(Json(ActivationResponse {
        activation_id: outcome.activation_id.as_str().to_string(),
        start: outcome.time_span.start().to_rfc3339(),
        end: outcome.time_span.end().to_rfc3339(),
    }))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RequestActivationRequest {
    pub role: String,
    /// Minutes.
    pub duration: i64,
    pub reviewers: Vec<String>,
    pub justification: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct IssuedRequestResponse {
    pub activation_id: String,
    pub start: String,
    pub end: String,
}

#[utoipa::path(
    post,
    path = "/api/projects/{id}/roles/request",
    tag = "activation",
    responses((status = 200, description = "MPA request issued, reviewers notified", body = IssuedRequestResponse))
)]
pub async fn request_activation(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    Json(body): Json<RequestActivationRequest>,
) -> ApiResult<Json<IssuedRequestResponse>> {
    let project = ProjectId::new(id).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    let project_role = ProjectRole::new(project.clone(), body.role);
    let ctx = state.catalog.create_context(user);

    let mut reviewers = HashSet::new();
    for email in body.reviewers {
        let email = jit_kernel::UserEmail::from_str(&email)
            .map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
        reviewers.insert(email);
    }

    let issued = state
        .activator
        .create_mpa_request(
            &ctx,
            &project,
            &project_role,
            chrono::Duration::minutes(body.duration),
            &body.justification,
            reviewers,
        )
        .await?;

    Ok(Json(IssuedRequestResponse {
        activation_id: issued.activation_id.as_str().to_string(),
        start: issued.time_span.start().to_rfc3339(),
        end: issued.time_span.end().to_rfc3339(),
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecodeQuery {
    pub activation: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DecodedRequestResponse {
    pub beneficiary: String,
    pub project: String,
    pub role: String,
    pub justification: String,
    pub reviewers: Vec<String>,
    pub start: String,
    pub end: String,
}

#[utoipa::path(
    get,
    path = "/api/activation-request",
    tag = "activation",
    params(("activation" = String, Query, description = "Obfuscated MPA token")),
    responses((status = 200, description = "Decoded request, no access granted", body = DecodedRequestResponse))
)]
pub async fn decode_activation_request(
    State(state): State<AppState>,
    Query(params): Query<DecodeQuery>,
) -> ApiResult<Json<DecodedRequestResponse>> {
    let decoded = state.activator.decode_mpa_request(&params.activation).await?;
    Ok(Json(DecodedRequestResponse {
        beneficiary: decoded.request.beneficiary.as_str().to_string(),
        project: decoded.request.project.as_str().to_string(),
        role: decoded.request.project_role.role.clone(),
        justification: decoded.request.justification,
        reviewers: decoded.reviewers.into_iter().map(|u| u.as_str().to_string()).collect(),
        start: decoded.request.time_span.start().to_rfc3339(),
        end: decoded.request.time_span.end().to_rfc3339(),
    }))
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ApproveRequest {
    pub activation: String,
}

#[utoipa::path(
    post,
    path = "/api/activation-request/approve",
    tag = "activation",
    responses((status = 200, description = "Access granted", body = ActivationResponse))
)]
pub async fn approve_activation_request(
    State(state): State<AppState>,
    Identity(user): Identity,
    Json(body): Json<ApproveRequest>,
) -> ApiResult<Json<ActivationResponse>> {
    let ctx = state.catalog.create_context(user);
    let outcome = state
        .activator
        .approve_mpa_request(&ctx, &body.activation)
        .await?;

    Ok(Json(ActivationResponse {
        activation_id: outcome.activation_id.as_str().to_string(),
        start: outcome.time_span.start().to_rfc3339(),
        end: outcome.time_span.end().to_rfc3339(),
    }))
}
