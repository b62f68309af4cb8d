//! Application state for the JIT access API.
//!
//! `AppState` is cloned into every Axum handler and exposes only the
//! composed `Activator`/`Catalog` ports plus the metadata callers need for
//! `/metadata` — handlers never reach into infrastructure directly.

use crate::config::Config;
use jit_activator::Activator;
use jit_catalog::Catalog;
use jit_provisioner::InMemoryPolicyClient;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub activator: Arc<Activator<InMemoryPolicyClient>>,
    pub catalog: Arc<Catalog>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        activator: Arc<Activator<InMemoryPolicyClient>>,
        catalog: Arc<Catalog>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            activator,
            catalog,
            config,
        }
    }
}
