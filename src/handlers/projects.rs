//! `GET /projects`, `GET /projects/{id}/roles`, `GET /projects/{id}/peers`
//! (spec §6).

use crate::app_state::AppState;
use crate::auth::Identity;
use crate::error::{ApiError, ApiResult};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use jit_catalog::PrivilegeStatus;
use jit_condition::ActivationType;
use jit_kernel::ProjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProjectsResponse {
    pub projects: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "catalog",
    responses((status = 200, description = "Scopes visible to the caller", body = ProjectsResponse))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    Identity(user): Identity,
) -> ApiResult<Json<ProjectsResponse>> {
    let ctx = state.catalog.create_context(user);
    let scopes = state.catalog.list_scopes(&ctx).await?;
    Ok(Json(ProjectsResponse {
        projects: scopes.into_iter().map(|p| p.as_str().to_string()).collect(),
    }))
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrivilegeDto {
    pub role: String,
    pub name: String,
    pub activation_type: String,
    pub status: String,
    /// Set for `ACTIVE`/`EXPIRED` entries: the window the role was
    /// provisioned with.
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PrivilegesResponse {
    pub available: Vec<PrivilegeDto>,
    pub warnings: Vec<String>,
}

fn describe_activation_type(activation_type: &ActivationType) -> String {
    match activation_type {
        ActivationType::SelfApproval => "SELF_APPROVAL".to_string(),
        ActivationType::PeerApproval(Some(topic)) => format!("PEER_APPROVAL:{topic}"),
        ActivationType::PeerApproval(None) => "PEER_APPROVAL".to_string(),
        ActivationType::ExternalApproval(Some(topic)) => format!("EXTERNAL_APPROVAL:{topic}"),
        ActivationType::ExternalApproval(None) => "EXTERNAL_APPROVAL".to_string(),
        ActivationType::NoActivation => "NO_ACTIVATION".to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/roles",
    tag = "catalog",
    responses((status = 200, description = "Privileges available to the caller", body = PrivilegesResponse))
)]
pub async fn list_roles(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
) -> ApiResult<Json<PrivilegesResponse>> {
    let project = ProjectId::new(id).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    let ctx = state.catalog.create_context(user);
    let privileges = state.catalog.list_privileges(&ctx, &project).await?;

    let mut entries: Vec<PrivilegeDto> = privileges
        .available
        .into_iter()
        .map(|p| PrivilegeDto {
            role: p.id.role.clone(),
            name: p.name,
            activation_type: describe_activation_type(&p.activation_type),
            status: format!("{:?}", p.status).to_uppercase(),
            start: None,
            end: None,
        })
        .collect();

    // An activated-but-no-longer-eligible role still must appear in the
    // listing until its window ends, with `activationType = NO_ACTIVATION`
    // (spec §8 scenario 6): merge the repository's active/expired windows
    // in alongside the available privileges rather than dropping them.
    for (id, activation) in privileges.active {
        entries.push(PrivilegeDto {
            role: id.role.clone(),
            name: id.role,
            activation_type: describe_activation_type(&ActivationType::NoActivation),
            status: format!("{:?}", PrivilegeStatus::Active).to_uppercase(),
            start: Some(activation.time_span.start().to_rfc3339()),
            end: Some(activation.time_span.end().to_rfc3339()),
        });
    }
    for (id, activation) in privileges.expired {
        entries.push(PrivilegeDto {
            role: id.role.clone(),
            name: id.role,
            activation_type: describe_activation_type(&ActivationType::NoActivation),
            status: format!("{:?}", PrivilegeStatus::Expired).to_uppercase(),
            start: Some(activation.time_span.start().to_rfc3339()),
            end: Some(activation.time_span.end().to_rfc3339()),
        });
    }

    Ok(Json(PrivilegesResponse {
        available: entries,
        warnings: privileges.warnings,
    }))
}

#[derive(Debug, Clone, Deserialize)]
pub struct PeersQuery {
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PeersResponse {
    pub reviewers: Vec<String>,
}

#[utoipa::path(
    get,
    path = "/api/projects/{id}/peers",
    tag = "catalog",
    params(("role" = String, Query, description = "Project role to find reviewers for")),
    responses((status = 200, description = "Reviewers qualified for the role", body = PeersResponse))
)]
pub async fn list_peers(
    State(state): State<AppState>,
    Identity(user): Identity,
    Path(id): Path<String>,
    Query(params): Query<PeersQuery>,
) -> ApiResult<Json<PeersResponse>> {
    let project = ProjectId::new(id).map_err(|e| ApiError::InvalidArgument(e.to_string()))?;
    let ctx = state.catalog.create_context(user);
    let project_role = jit_kernel::ProjectRole::new(project.clone(), params.role);

    // Listing reviewers is activation-type-agnostic on this endpoint: any
    // MPA family qualifies, so a topic-less peer-approval marker is used as
    // the broadest query (spec §3 parent relation: topic-less is parent of
    // every topic in its family).
    let reviewers = state
        .catalog
        .list_reviewers(&ctx, &project, &project_role, &ActivationType::PeerApproval(None))
        .await?;

    Ok(Json(PeersResponse {
        reviewers: reviewers.into_iter().map(|u| u.as_str().to_string()).collect(),
    }))
}

