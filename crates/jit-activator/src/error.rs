//! Unified error kind for the activation flows (spec §7).
//!
//! Every collaborator error collapses into one of these kinds so the API
//! layer can do a single status-code mapping rather than match on four
//! crates' error enums.

use jit_catalog::CatalogError;
use jit_notify::NotifyError;
use jit_provisioner::ProvisionerError;
use jit_tokens::TokenError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActivatorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("cloud API unavailable: {0}")]
    Unavailable(String),
}

impl From<CatalogError> for ActivatorError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidArgument(m) => ActivatorError::InvalidArgument(m),
            CatalogError::AccessDenied(m) => ActivatorError::AccessDenied(m),
            CatalogError::NotFound(m) => ActivatorError::NotFound(m),
            CatalogError::Unavailable(m) => ActivatorError::Unavailable(m),
        }
    }
}

impl From<ProvisionerError> for ActivatorError {
    fn from(err: ProvisionerError) -> Self {
        match err {
            ProvisionerError::AlreadyExists(m) => ActivatorError::AlreadyExists(m),
            ProvisionerError::NotFound(m) => ActivatorError::NotFound(m),
            ProvisionerError::Unavailable(m) => ActivatorError::Unavailable(m),
        }
    }
}

impl From<NotifyError> for ActivatorError {
    fn from(err: NotifyError) -> Self {
        match err {
            NotifyError::InvalidArgument(m) => ActivatorError::InvalidArgument(m),
            // Delivery failures never block activation (spec §9); callers
            // that reach this conversion have chosen to propagate one
            // explicitly rather than swallow it.
            NotifyError::DeliveryFailed(m) => ActivatorError::Unavailable(m),
        }
    }
}

/// Token failures collapse into `AccessDenied` regardless of cause, to
/// avoid giving an attacker an oracle on why a token was rejected (spec §7).
impl From<TokenError> for ActivatorError {
    fn from(_err: TokenError) -> Self {
        ActivatorError::AccessDenied("approval token is not valid".to_string())
    }
}
