//! Variant B backend: batch effective-policy API plus direct group
//! membership expansion (spec §4.3.2).

use super::{find_reviewer_holders_via_effective_policy, RoleRepository};
use crate::domain::{
    dedup_and_sort_privileges, Activation, PrivilegeSet, PrivilegeStatus, RequesterPrivilege,
};
use crate::error::CatalogError;
use crate::ports::{EffectiveBinding, EffectivePolicyClient, GroupDirectory};
use async_trait::async_trait;
use jit_condition::{ActivationType, RecognizedCondition};
use jit_kernel::{Clock, ProjectId, ProjectRole, UserEmail};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{instrument, warn};

pub struct EffectivePolicyRepository {
    effective: Arc<dyn EffectivePolicyClient>,
    groups: Arc<dyn GroupDirectory>,
    clock: Arc<dyn Clock>,
}

impl EffectivePolicyRepository {
    pub fn new(
        effective: Arc<dyn EffectivePolicyClient>,
        groups: Arc<dyn GroupDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            effective,
            groups,
            clock,
        }
    }

    /// Directly-held and group-held principal strings for `user`, with
    /// `AccessDenied` for an external group's membership lookup swallowed
    /// into a warning rather than failing the whole lookup (spec §4.3.2).
    /// Any other error (transport/`Unavailable`) propagates unwrapped per
    /// spec §5, since silently treating it as "no group memberships" would
    /// under-report eligibility rather than merely skip one external group.
    async fn principal_set(&self, user: &UserEmail) -> Result<(HashSet<String>, Vec<String>), CatalogError> {
        let mut principals = HashSet::new();
        principals.insert(format!("user:{}", user.as_str()));

        match self.groups.direct_memberships(user).await {
            Ok(groups) => {
                for group in groups {
                    principals.insert(format!("group:{group}"));
                }
                Ok((principals, Vec::new()))
            }
            Err(CatalogError::AccessDenied(msg)) => {
                warn!(user = user.as_str(), %msg, "group membership lookup denied, treating as empty");
                Ok((
                    principals,
                    vec![format!("group membership lookup denied: {msg}")],
                ))
            }
            Err(other) => Err(other),
        }
    }

    fn classify(
        &self,
        project: &ProjectId,
        binding: &EffectiveBinding,
        now: chrono::DateTime<chrono::Utc>,
        into: &mut PrivilegeSet,
    ) {
        let Some(expression) = binding.condition_expression.as_deref() else {
            return;
        };
        let title = binding.condition_title.as_deref().unwrap_or_default();

        let recognized = match jit_condition::recognize(title, expression) {
            Ok(r) => r,
            Err(_) => return,
        };

        let id = ProjectRole::new(project.clone(), binding.role.clone());

        match recognized {
            RecognizedCondition::Eligibility {
                activation_type,
                resource_condition,
            } => {
                into.available.push(RequesterPrivilege {
                    id,
                    name: binding.role.clone(),
                    activation_type,
                    status: PrivilegeStatus::Inactive,
                    resource_condition,
                });
            }
            RecognizedCondition::Activated(span) => {
                if span.is_valid(now) {
                    into.active.insert(id, Activation { time_span: span });
                } else {
                    into.expired.insert(id, Activation { time_span: span });
                }
            }
            RecognizedCondition::Unrecognized => {}
        }
    }
}

#[async_trait]
impl RoleRepository for EffectivePolicyRepository {
    #[instrument(skip(self))]
    async fn find_projects_with_privileges(
        &self,
        _user: &UserEmail,
    ) -> Result<Vec<ProjectId>, CatalogError> {
        // This backend has no batch "search by permission" call; callers
        // configure `AVAILABLE_PROJECTS_QUERY` (ProjectSearch) instead when
        // this backend is active (spec §4.4).
        Err(CatalogError::Unavailable(
            "find_projects_with_privileges requires AVAILABLE_PROJECTS_QUERY with this backend"
                .to_string(),
        ))
    }

    #[instrument(skip(self))]
    async fn find_privileges(
        &self,
        user: &UserEmail,
        project: &ProjectId,
    ) -> Result<PrivilegeSet, CatalogError> {
        // Both calls run concurrently; either can fail outright — an
        // external group's `AccessDenied` is the only group-lookup failure
        // swallowed into a warning by `principal_set` (spec §4.3.2).
        let (bindings, principals) =
            futures::join!(self.effective.effective_bindings(project), self.principal_set(user));
        let bindings = bindings?;
        let (principals, warnings) = principals?;

        let now = self.clock.now();
        let mut set = PrivilegeSet::new();
        set.warnings = warnings;

        for binding in bindings
            .iter()
            .filter(|b| b.members.iter().any(|m| principals.contains(m)))
        {
            self.classify(project, binding, now, &mut set);
        }

        set.available = dedup_and_sort_privileges(std::mem::take(&mut set.available));
        Ok(set)
    }

    #[instrument(skip(self))]
    async fn find_reviewer_holders(
        &self,
        project: &ProjectId,
        project_role: &ProjectRole,
        activation_type: &ActivationType,
    ) -> Result<HashSet<UserEmail>, CatalogError> {
        find_reviewer_holders_via_effective_policy(
            self.effective.as_ref(),
            self.groups.as_ref(),
            project,
            project_role,
            activation_type,
        )
        .await
    }
}
