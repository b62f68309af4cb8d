#![allow(clippy::module_name_repetitions)]
//! Domain value objects shared by every bounded context.
//!
//! Only truly transversal, dependency-free types live here: the typed
//! resource identifiers of spec §3 (`ids`) and the `TimeSpan` validity
//! window (`time_span`). Anything that encodes eligibility or activation
//! business rules belongs to a feature crate instead.

pub mod ids;
pub mod time_span;

#[cfg(test)]
mod ids_test;
#[cfg(test)]
mod time_span_test;

pub use ids::{ActivationId, ActivationIdKind, ProjectId, ProjectRole, RoleBinding, UserEmail, ValidationError};
pub use time_span::TimeSpan;
