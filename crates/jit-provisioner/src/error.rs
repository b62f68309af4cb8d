use thiserror::Error;

/// Errors surfaced by the provisioning engine, aligned to the error kinds
/// of the error-handling design (`AlreadyExists`/`Unavailable`/...).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProvisionerError {
    #[error("already exists: {0}")]
    AlreadyExists(String),

    #[error("project not found: {0}")]
    NotFound(String),

    #[error("cloud API unavailable: {0}")]
    Unavailable(String),
}
