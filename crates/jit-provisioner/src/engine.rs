//! Optimistic-concurrency binding provisioning (spec §4.2).

use crate::domain::{Binding, PolicyBinding};
use crate::error::ProvisionerError;
use crate::options::ProvisionOptions;
use crate::ports::{PolicyClient, PolicyClientError};
use jit_kernel::ProjectId;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

const MAX_ATTEMPTS: u32 = 4;
const RETRY_BACKOFF: Duration = Duration::from_millis(200);

/// Adds time-bounded or permanent bindings to a project's IAM policy with
/// read-modify-write retry on conflict.
pub struct ProvisioningEngine<C: PolicyClient> {
    client: Arc<C>,
}

impl<C: PolicyClient> ProvisioningEngine<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    #[instrument(skip(self, binding, reason_tag), fields(project = %project.as_str(), role = %binding.role))]
    pub async fn add_project_binding(
        &self,
        project: &ProjectId,
        binding: Binding,
        options: ProvisionOptions,
        reason_tag: &str,
    ) -> Result<(), ProvisionerError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let mut policy = self
                .client
                .get_policy(project)
                .await
                .map_err(map_client_err)?;

            if options.fail_if_binding_exists
                && policy.bindings.iter().any(|b| b.equals_requested(&binding))
            {
                return Err(ProvisionerError::AlreadyExists(
                    "binding already exists".to_string(),
                ));
            }

            if options.purge_existing_temporary_bindings {
                policy.bindings.retain(|b| {
                    !(b.same_role_and_members(&binding.role, &binding.principal) && b.is_temporary())
                });
            }

            policy
                .bindings
                .push(PolicyBinding::singleton(binding.clone()));

            match self.client.set_policy(project, policy, reason_tag).await {
                Ok(()) => {
                    metrics::counter!("jit_provisioner_cas_attempts_total").increment(attempt as u64);
                    return Ok(());
                }
                Err(PolicyClientError::Conflict) => {
                    metrics::counter!("jit_provisioner_cas_retries_total").increment(1);
                    warn!(attempt, "policy write conflict, retrying");
                    tokio::time::sleep(RETRY_BACKOFF).await;
                    continue;
                }
                Err(other) => return Err(map_client_err(other)),
            }
        }

        Err(ProvisionerError::AlreadyExists(
            "concurrent modification".to_string(),
        ))
    }
}

fn map_client_err(err: PolicyClientError) -> ProvisionerError {
    match err {
        PolicyClientError::NotFound(id) => ProvisionerError::NotFound(id),
        PolicyClientError::Unavailable(msg) => ProvisionerError::Unavailable(msg),
        PolicyClientError::Conflict => {
            ProvisionerError::AlreadyExists("concurrent modification".to_string())
        }
    }
}
