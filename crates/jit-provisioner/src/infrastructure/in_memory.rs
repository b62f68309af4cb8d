//! In-memory `PolicyClient` fake for unit and concurrency testing.

use crate::domain::VersionedPolicy;
use crate::ports::{PolicyClient, PolicyClientError};
use async_trait::async_trait;
use jit_kernel::ProjectId;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;
use tracing::debug;

/// Thread-safe in-memory policy store. Supports injecting a fixed number
/// of spurious write conflicts per project, for exercising the CAS retry
/// loop deterministically.
#[derive(Default)]
pub struct InMemoryPolicyClient {
    policies: RwLock<HashMap<String, VersionedPolicy>>,
    injected_conflicts: RwLock<HashMap<String, AtomicUsize>>,
}

impl InMemoryPolicyClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, project: &ProjectId, policy: VersionedPolicy) {
        self.policies
            .write()
            .unwrap()
            .insert(project.as_str().to_string(), policy);
    }

    /// The next `count` `set_policy` calls for `project` fail with
    /// `Conflict` regardless of version, before succeeding normally.
    pub fn inject_conflicts(&self, project: &ProjectId, count: usize) {
        self.injected_conflicts
            .write()
            .unwrap()
            .insert(project.as_str().to_string(), AtomicUsize::new(count));
    }

    pub fn current_policy(&self, project: &ProjectId) -> Option<VersionedPolicy> {
        self.policies.read().unwrap().get(project.as_str()).cloned()
    }
}

#[async_trait]
impl PolicyClient for InMemoryPolicyClient {
    async fn get_policy(&self, project: &ProjectId) -> Result<VersionedPolicy, PolicyClientError> {
        let guard = self.policies.read().unwrap();
        match guard.get(project.as_str()) {
            Some(policy) => Ok(policy.clone()),
            None => Ok(VersionedPolicy::new(0, Vec::new())),
        }
    }

    async fn set_policy(
        &self,
        project: &ProjectId,
        policy: VersionedPolicy,
        reason_tag: &str,
    ) -> Result<(), PolicyClientError> {
        if let Some(counter) = self.injected_conflicts.read().unwrap().get(project.as_str()) {
            if counter
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                    if n > 0 { Some(n - 1) } else { None }
                })
                .is_ok()
            {
                return Err(PolicyClientError::Conflict);
            }
        }

        let mut guard = self.policies.write().unwrap();
        let current_version = guard.get(project.as_str()).map(|p| p.version).unwrap_or(0);
        if policy.version != current_version {
            return Err(PolicyClientError::Conflict);
        }

        debug!(project = project.as_str(), reason_tag, "writing policy");
        guard.insert(
            project.as_str().to_string(),
            VersionedPolicy::new(current_version + 1, policy.bindings),
        );
        Ok(())
    }
}
