//! Cloud-API collaborators the catalog/role-repository backends depend on.

use crate::error::CatalogError;
use async_trait::async_trait;
use jit_kernel::{ProjectId, UserEmail};

/// Symbolic CEL evaluation verdict returned by the policy-analyzer API for
/// one (binding, user) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionVerdict {
    True,
    False,
    Conditional,
}

/// One binding surfaced by the analyzer, already personalized to a user.
#[derive(Debug, Clone)]
pub struct AnalyzedBinding {
    pub full_resource_name: String,
    pub role: String,
    pub condition_title: Option<String>,
    pub condition_expression: Option<String>,
    pub verdict: ConditionVerdict,
}

/// Variant A backend (spec §4.3.1): a policy-analyzer API that expands
/// group membership and evaluates conditions symbolically.
#[async_trait]
pub trait PolicyAnalyzerClient: Send + Sync {
    async fn analyze_for_user(
        &self,
        user: &UserEmail,
        project: &ProjectId,
    ) -> Result<Vec<AnalyzedBinding>, CatalogError>;

    /// Search bindings granting `permission`, with resource expansion, used
    /// by `findProjectsWithPrivileges`.
    async fn search_resources_with_permission(
        &self,
        user: &UserEmail,
        permission: &str,
    ) -> Result<Vec<String>, CatalogError>;
}

/// A binding as it appears in a project's effective (ancestor-merged) IAM
/// policy, prior to any per-user personalization.
#[derive(Debug, Clone)]
pub struct EffectiveBinding {
    pub role: String,
    /// `"user:<email>"` or `"group:<id>"` entries, as stored by the cloud API.
    pub members: Vec<String>,
    pub condition_title: Option<String>,
    pub condition_expression: Option<String>,
}

/// Variant B backend (spec §4.3.2): the batch effective-policy API.
#[async_trait]
pub trait EffectivePolicyClient: Send + Sync {
    async fn effective_bindings(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<EffectiveBinding>, CatalogError>;
}

/// Direct group memberships of a user, used to expand the effective-policy
/// backend's principal set.
#[async_trait]
pub trait GroupDirectory: Send + Sync {
    async fn direct_memberships(&self, user: &UserEmail) -> Result<Vec<String>, CatalogError>;
}

/// Fast, potentially over-broad resource-manager project search, used when
/// `AVAILABLE_PROJECTS_QUERY` is configured (spec §4.4).
#[async_trait]
pub trait ProjectSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<ProjectId>, CatalogError>;
}
