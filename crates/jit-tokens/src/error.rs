use thiserror::Error;

/// Token failures collapse into `AccessDenied` at the caller boundary to
/// avoid oracle attacks (spec §7); this enum keeps the underlying cause for
/// logging.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("token is malformed: {0}")]
    Malformed(String),

    #[error("token signature is invalid")]
    InvalidSignature,

    #[error("token has expired")]
    Expired,

    #[error("token issuer or audience does not match the configured service account")]
    WrongParty,

    #[error("signing key unavailable: {0}")]
    KeyUnavailable(String),
}
