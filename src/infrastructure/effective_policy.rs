//! Adapts the provisioner's in-memory policy store into the catalog's
//! `EffectivePolicyClient` port, so eligibility (`available`) and activation
//! (`active`/`expired`) markers are read from the very same policy object
//! the activator writes to on approval (spec §4.3.2, §4.5).

use async_trait::async_trait;
use jit_catalog::ports::{EffectiveBinding, EffectivePolicyClient};
use jit_catalog::CatalogError;
use jit_kernel::ProjectId;
use jit_provisioner::InMemoryPolicyClient;
use std::sync::Arc;

pub struct SharedPolicyEffectiveClient {
    store: Arc<InMemoryPolicyClient>,
}

impl SharedPolicyEffectiveClient {
    pub fn new(store: Arc<InMemoryPolicyClient>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl EffectivePolicyClient for SharedPolicyEffectiveClient {
    async fn effective_bindings(
        &self,
        project: &ProjectId,
    ) -> Result<Vec<EffectiveBinding>, CatalogError> {
        let policy = self
            .store
            .current_policy(project)
            .unwrap_or_else(|| jit_provisioner::VersionedPolicy::new(0, Vec::new()));

        Ok(policy
            .bindings
            .into_iter()
            .map(|binding| EffectiveBinding {
                role: binding.role,
                members: binding
                    .members
                    .iter()
                    .map(|m| format!("user:{}", m.as_str()))
                    .collect(),
                condition_title: binding.condition.as_ref().map(|c| c.title.clone()),
                condition_expression: binding.condition.as_ref().map(|c| c.expression.clone()),
            })
            .collect())
    }
}
