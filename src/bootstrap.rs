//! Bootstrap: wires the in-memory reference infrastructure into the
//! `Catalog` and `Activator` ports and returns the composed `AppState`.
//!
//! This mirrors the teacher's composition-root shape (one function,
//! infra-then-use-cases-then-state) but there is no database to connect:
//! per spec §6, the only persistent state is the cloud IAM policy itself,
//! represented here by the shared in-memory policy store.

use crate::app_state::AppState;
use crate::config::Config;
use crate::infrastructure::{NoGroupsDirectory, SharedPolicyEffectiveClient, StaticProjectSearch};
use jit_activator::Activator;
use jit_catalog::{Catalog, CatalogLimits, ScopeDiscovery};
use jit_kernel::{InMemoryEventBus, ProjectId, SystemClock};
use jit_notify::{InMemorySink, JustificationPolicy};
use jit_provisioner::{InMemoryPolicyClient, ProvisioningEngine};
use jit_tokens::{JwtSigner, JwtVerifier, TokenExpiry};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

/// Minimal signing-key source backed by a fixed RSA key supplied out of
/// band (an environment secret in production — see spec §5 "suspension
/// points" for the analogous secret-read call). No reference key is baked
/// into this crate; callers of `bootstrap` must provide one.
pub struct Keys {
    pub signing: Arc<dyn jit_tokens::SigningKeySource>,
    pub decoding: Arc<dyn jit_tokens::DecodingKeySource>,
}

pub fn bootstrap(config: Config, keys: Keys) -> Result<AppState, String> {
    info!("wiring JIT access API composition root");

    let policy_store = Arc::new(InMemoryPolicyClient::new());

    let effective_client: Arc<dyn jit_catalog::ports::EffectivePolicyClient> =
        Arc::new(SharedPolicyEffectiveClient::new(policy_store.clone()));
    let groups: Arc<dyn jit_catalog::ports::GroupDirectory> = Arc::new(NoGroupsDirectory);
    let clock: Arc<dyn jit_kernel::Clock> = Arc::new(SystemClock);

    let repository: Arc<dyn jit_catalog::repository::RoleRepository> = Arc::new(
        jit_catalog::repository::EffectivePolicyRepository::new(
            effective_client.clone(),
            groups,
            clock.clone(),
        ),
    );

    let scope_discovery = match &config.activation.available_projects_query {
        Some(query) => {
            let project = ProjectId::from_str(&config.activation.resource_scope)
                .map_err(|e| format!("invalid RESOURCE_SCOPE: {e}"))?;
            ScopeDiscovery::ProjectSearch {
                client: Arc::new(StaticProjectSearch::new(project)),
                query: query.clone(),
            }
        }
        None => ScopeDiscovery::RoleRepository,
    };

    let catalog = Arc::new(Catalog::new(
        repository,
        scope_discovery,
        CatalogLimits {
            max_activation_duration: chrono::Duration::minutes(
                config.activation.max_activation_minutes,
            ),
            ..CatalogLimits::default()
        },
    ));

    let provisioner = Arc::new(ProvisioningEngine::new(policy_store));
    let justification_policy = Arc::new(
        JustificationPolicy::new(
            &config.justification.pattern,
            config.justification.hint.clone(),
        )
        .map_err(|e| format!("invalid JUSTIFICATION_PATTERN: {e}"))?,
    );
    let notifier: Arc<dyn jit_notify::NotificationSink> = Arc::new(InMemorySink::new());
    let signer = Arc::new(JwtSigner::new(
        keys.signing,
        clock.clone(),
        TokenExpiry(chrono::Duration::minutes(
            config.activation.request_token_minutes,
        )),
    ));
    let verifier = Arc::new(JwtVerifier::new(keys.decoding, signer_party(&config)));
    let events = Arc::new(InMemoryEventBus::new());

    let activator = Arc::new(Activator::new(
        catalog.clone(),
        provisioner,
        clock,
        justification_policy,
        notifier,
        signer,
        verifier,
        events,
        format!("https://{}/activation-request", config.server.host),
    ));

    Ok(AppState::new(activator, catalog, Arc::new(config)))
}

fn signer_party(config: &Config) -> String {
    format!("jit-access@{}.iam.gserviceaccount.com", sanitize(&config.activation.resource_scope))
}

fn sanitize(resource_scope: &str) -> String {
    resource_scope.replace('/', "-")
}
