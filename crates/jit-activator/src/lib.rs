//! Activation state machine: turns a validated request into a provisioned,
//! time-bounded IAM binding, via either self-approval or multi-party
//! approval (spec C6).

pub mod activator;
pub mod domain;
pub mod error;
pub mod events;

pub use activator::Activator;
pub use domain::{ActivationOutcome, ActivationRequest, IssuedMpaRequest, MpaRequest};
pub use error::ActivatorError;
pub use events::ActivatorEvent;
