//! Public read-side surface (spec §4.4): scopes, privileges, reviewers, and
//! the pre-flight checks the activator relies on before provisioning.

use crate::domain::{PrivilegeSet, UserContext};
use crate::error::CatalogError;
use crate::limits::{min_activation_duration, CatalogLimits};
use crate::ports::ProjectSearch;
use crate::repository::RoleRepository;
use jit_condition::ActivationType;
use jit_kernel::{ProjectId, ProjectRole, UserEmail};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

/// How `listScopes` discovers the caller's projects (spec §4.4).
pub enum ScopeDiscovery {
    /// Delegate to `findProjectsWithPrivileges` — slow, accurate.
    RoleRepository,
    /// Delegate to a resource-manager project search — fast, potentially
    /// over-broad.
    ProjectSearch {
        client: Arc<dyn ProjectSearch>,
        query: String,
    },
}

pub struct Catalog {
    repository: Arc<dyn RoleRepository>,
    scope_discovery: ScopeDiscovery,
    limits: CatalogLimits,
}

impl Catalog {
    pub fn new(
        repository: Arc<dyn RoleRepository>,
        scope_discovery: ScopeDiscovery,
        limits: CatalogLimits,
    ) -> Self {
        Self {
            repository,
            scope_discovery,
            limits,
        }
    }

    pub fn create_context(&self, user: UserEmail) -> UserContext {
        UserContext::new(user)
    }

    #[instrument(skip(self))]
    pub async fn list_scopes(&self, ctx: &UserContext) -> Result<Vec<ProjectId>, CatalogError> {
        match &self.scope_discovery {
            ScopeDiscovery::RoleRepository => {
                self.repository.find_projects_with_privileges(&ctx.user).await
            }
            ScopeDiscovery::ProjectSearch { client, query } => client.search(query).await,
        }
    }

    #[instrument(skip(self))]
    pub async fn list_privileges(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
    ) -> Result<PrivilegeSet, CatalogError> {
        self.repository.find_privileges(&ctx.user, project).await
    }

    #[instrument(skip(self))]
    pub async fn list_reviewers(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
        project_role: &ProjectRole,
        activation_type: &ActivationType,
    ) -> Result<Vec<UserEmail>, CatalogError> {
        let mut holders = self
            .repository
            .find_reviewer_holders(project, project_role, activation_type)
            .await?;
        holders.remove(&ctx.user);
        let mut sorted: Vec<UserEmail> = holders.into_iter().collect();
        sorted.sort();
        Ok(sorted)
    }

    /// Pre-flight validation for `createRequest` (spec §4.4).
    #[instrument(skip(self, privileges, reviewers))]
    pub async fn verify_user_can_request(
        &self,
        ctx: &UserContext,
        project: &ProjectId,
        privileges: &[ProjectRole],
        activation_type: &ActivationType,
        duration: chrono::Duration,
        reviewers: &HashSet<UserEmail>,
    ) -> Result<(), CatalogError> {
        if duration < min_activation_duration() || duration > self.limits.max_activation_duration {
            return Err(CatalogError::InvalidArgument(format!(
                "duration must be between {} and {} minutes",
                min_activation_duration().num_minutes(),
                self.limits.max_activation_duration.num_minutes()
            )));
        }
        if privileges.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "at least one privilege must be requested".to_string(),
            ));
        }
        if privileges.len() > self.limits.max_roles_per_request {
            return Err(CatalogError::InvalidArgument(format!(
                "at most {} roles may be requested at once",
                self.limits.max_roles_per_request
            )));
        }

        let is_mpa = matches!(
            activation_type,
            ActivationType::PeerApproval(_) | ActivationType::ExternalApproval(_)
        );
        if is_mpa {
            if privileges.len() != 1 {
                return Err(CatalogError::InvalidArgument(
                    "multi-party approval requests must name exactly one privilege".to_string(),
                ));
            }
            if reviewers.contains(&ctx.user) {
                return Err(CatalogError::InvalidArgument(
                    "requester may not be named as a reviewer".to_string(),
                ));
            }
            if reviewers.len() < self.limits.min_reviewers
                || reviewers.len() > self.limits.max_reviewers
            {
                return Err(CatalogError::InvalidArgument(format!(
                    "reviewer count must be between {} and {}",
                    self.limits.min_reviewers, self.limits.max_reviewers
                )));
            }
        }

        let available = self.list_privileges(ctx, project).await?;
        for role in privileges {
            let eligible = available
                .available
                .iter()
                .find(|p| &p.id == role)
                .map(|p| p.activation_type.is_parent_of(activation_type))
                .unwrap_or(false);
            if !eligible {
                return Err(CatalogError::AccessDenied(format!(
                    "no eligible privilege for {role}"
                )));
            }
        }

        Ok(())
    }

    /// Pre-flight validation for `approve`/`approveMpa` (spec §4.4).
    #[instrument(skip(self))]
    pub async fn verify_user_can_approve(
        &self,
        approver: &UserEmail,
        requester: &UserEmail,
        project: &ProjectId,
        project_role: &ProjectRole,
        activation_type: &ActivationType,
    ) -> Result<(), CatalogError> {
        match activation_type {
            ActivationType::SelfApproval => {
                if approver == requester {
                    Ok(())
                } else {
                    Err(CatalogError::AccessDenied(
                        "self-approval requires the approver to be the requester".to_string(),
                    ))
                }
            }
            ActivationType::PeerApproval(_) | ActivationType::ExternalApproval(_) => {
                if approver == requester {
                    return Err(CatalogError::AccessDenied(
                        "multi-party approval cannot be approved by the requester".to_string(),
                    ));
                }
                let holders = self
                    .repository
                    .find_reviewer_holders(project, project_role, activation_type)
                    .await?;
                if holders.contains(approver) {
                    Ok(())
                } else {
                    Err(CatalogError::AccessDenied(
                        "approver does not hold a qualifying reviewer privilege".to_string(),
                    ))
                }
            }
            ActivationType::NoActivation => Err(CatalogError::AccessDenied(
                "privilege is not currently activatable".to_string(),
            )),
        }
    }
}
