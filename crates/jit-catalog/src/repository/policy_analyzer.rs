//! Variant A backend: personalized policy-analyzer API (spec §4.3.1).

use super::{find_reviewer_holders_via_effective_policy, RoleRepository};
use crate::domain::{
    dedup_and_sort_privileges, Activation, PrivilegeSet, PrivilegeStatus, RequesterPrivilege,
};
use crate::error::CatalogError;
use crate::ports::{ConditionVerdict, EffectivePolicyClient, GroupDirectory, PolicyAnalyzerClient};
use async_trait::async_trait;
use jit_condition::{ActivationType, RecognizedCondition};
use jit_kernel::{Clock, ProjectId, ProjectRole, UserEmail};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;
use tracing::instrument;

/// The single permission queried for `findProjectsWithPrivileges` (spec
/// §4.3.1).
const PROJECT_DISCOVERY_PERMISSION: &str = "resourcemanager.projects.get";

pub struct PolicyAnalyzerRepository {
    analyzer: Arc<dyn PolicyAnalyzerClient>,
    /// Used only by `find_reviewer_holders`, which needs a non-personalized
    /// view of a project's bindings — the analyzer API is personalized to
    /// one user and cannot enumerate all holders of a role directly.
    effective: Arc<dyn EffectivePolicyClient>,
    groups: Arc<dyn GroupDirectory>,
    clock: Arc<dyn Clock>,
}

impl PolicyAnalyzerRepository {
    pub fn new(
        analyzer: Arc<dyn PolicyAnalyzerClient>,
        effective: Arc<dyn EffectivePolicyClient>,
        groups: Arc<dyn GroupDirectory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            analyzer,
            effective,
            groups,
            clock,
        }
    }
}

#[async_trait]
impl RoleRepository for PolicyAnalyzerRepository {
    #[instrument(skip(self))]
    async fn find_projects_with_privileges(
        &self,
        user: &UserEmail,
    ) -> Result<Vec<ProjectId>, CatalogError> {
        let resources = self
            .analyzer
            .search_resources_with_permission(user, PROJECT_DISCOVERY_PERMISSION)
            .await?;

        let mut projects: Vec<ProjectId> = resources
            .iter()
            .filter_map(|r| ProjectId::from_str(r).ok())
            .collect();
        projects.sort();
        projects.dedup();
        Ok(projects)
    }

    #[instrument(skip(self))]
    async fn find_privileges(
        &self,
        user: &UserEmail,
        project: &ProjectId,
    ) -> Result<PrivilegeSet, CatalogError> {
        let bindings = self.analyzer.analyze_for_user(user, project).await?;
        tracing::debug!(as_of = %self.clock.now(), "classifying analyzer verdicts");
        let mut set = PrivilegeSet::new();

        for binding in &bindings {
            let Some(expression) = binding.condition_expression.as_deref() else {
                continue;
            };
            let title = binding.condition_title.as_deref().unwrap_or_default();
            let Ok(recognized) = jit_condition::recognize(title, expression) else {
                continue;
            };

            let id = ProjectRole::new(project.clone(), binding.role.clone());
            match (recognized, binding.verdict) {
                (
                    RecognizedCondition::Eligibility {
                        activation_type,
                        resource_condition,
                    },
                    ConditionVerdict::Conditional,
                ) => {
                    set.available.push(RequesterPrivilege {
                        id,
                        name: binding.role.clone(),
                        activation_type,
                        status: PrivilegeStatus::Inactive,
                        resource_condition,
                    });
                }
                (RecognizedCondition::Activated(span), ConditionVerdict::True) => {
                    set.active.insert(id, Activation { time_span: span });
                }
                (RecognizedCondition::Activated(span), ConditionVerdict::False) => {
                    set.expired.insert(id, Activation { time_span: span });
                }
                _ => {}
            }
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
