pub mod effective_policy;
pub mod policy_analyzer;

use crate::error::CatalogError;
use crate::ports::{EffectivePolicyClient, GroupDirectory};
use async_trait::async_trait;
use jit_condition::ActivationType;
use jit_kernel::{ProjectId, ProjectRole, UserEmail};
use std::collections::HashSet;
use std::str::FromStr;

pub use effective_policy::EffectivePolicyRepository;
pub use policy_analyzer::PolicyAnalyzerRepository;

/// The common contract both role-repository backends implement (spec §4.3).
#[async_trait]
pub trait RoleRepository: Send + Sync {
    async fn find_projects_with_privileges(
        &self,
        user: &UserEmail,
    ) -> Result<Vec<ProjectId>, CatalogError>;

    async fn find_privileges(
        &self,
        user: &UserEmail,
        project: &ProjectId,
    ) -> Result<crate::domain::PrivilegeSet, CatalogError>;

    async fn find_reviewer_holders(
        &self,
        project: &ProjectId,
        project_role: &ProjectRole,
        activation_type: &ActivationType,
    ) -> Result<HashSet<UserEmail>, CatalogError>;
}

/// Shared reviewer-holder resolution over a project's effective policy,
/// used by both backends (spec doesn't distinguish `findReviewerHolders`
/// by backend). Group members are not expanded here: only direct `user:`
/// principals are resolvable without a reverse group-membership API.
pub(crate) async fn find_reviewer_holders_via_effective_policy(
    effective: &dyn EffectivePolicyClient,
    _groups: &dyn GroupDirectory,
    project: &ProjectId,
    project_role: &ProjectRole,
    activation_type: &ActivationType,
) -> Result<HashSet<UserEmail>, CatalogError> {
    let bindings = effective.effective_bindings(project).await?;
    let mut holders = HashSet::new();

    for binding in bindings.iter().filter(|b| b.role == project_role.role) {
        let Some(expression) = binding.condition_expression.as_deref() else {
            continue;
        };

        let candidate_type = match activation_type {
            ActivationType::PeerApproval(_) => {
                jit_condition::recognize_marker(expression)
                    .map_err(|e| CatalogError::Unavailable(e.to_string()))?
                    .map(|m| m.activation_type)
            }
            ActivationType::ExternalApproval(_) => jit_condition::recognize_reviewer_marker(
                expression,
            )
            .map_err(|e| CatalogError::Unavailable(e.to_string()))?
            .map(|(topic, _)| ActivationType::ExternalApproval(topic)),
            ActivationType::SelfApproval | ActivationType::NoActivation => None,
        };

        let Some(candidate_type) = candidate_type else {
            continue;
        };
        if !candidate_type.is_parent_of(activation_type) {
            continue;
        }

        for member in &binding.members {
            if let Some(email) = member.strip_prefix("user:") {
                if let Ok(user_email) = UserEmail::from_str(email) {
                    holders.insert(user_email);
                }
            }
        }
    }

    Ok(holders)
}
