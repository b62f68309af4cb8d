//! IAM provisioning engine: optimistic-concurrency binding writes with
//! purge-on-activation semantics.

pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod options;
pub mod ports;

pub use domain::{Binding, Condition, PolicyBinding, VersionedPolicy};
pub use engine::ProvisioningEngine;
pub use error::ProvisionerError;
pub use infrastructure::InMemoryPolicyClient;
pub use options::ProvisionOptions;
pub use ports::{PolicyClient, PolicyClientError};
