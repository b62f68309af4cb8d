//! The provisioner's sole dependency: a read-modify-write IAM policy client.

use crate::domain::VersionedPolicy;
use async_trait::async_trait;
use jit_kernel::ProjectId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyClientError {
    #[error("project not found: {0}")]
    NotFound(String),

    /// Write rejected because `version` no longer matches the stored
    /// policy's version (optimistic-concurrency precondition failure).
    #[error("policy write conflict")]
    Conflict,

    #[error("cloud API unavailable: {0}")]
    Unavailable(String),
}

/// Read-modify-write access to a project's IAM policy, guarded by an
/// ETag-style `version` carried on [`VersionedPolicy`].
#[async_trait]
pub trait PolicyClient: Send + Sync {
    async fn get_policy(&self, project: &ProjectId) -> Result<VersionedPolicy, PolicyClientError>;

    /// Write back `policy`. `reason_tag` is propagated as an audit
    /// attribution header on the underlying API call.
    async fn set_policy(
        &self,
        project: &ProjectId,
        policy: VersionedPolicy,
        reason_tag: &str,
    ) -> Result<(), PolicyClientError>;
}
