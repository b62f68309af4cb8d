//! Identity-aware-proxy trust boundary (spec §6): "Every `/api` call
//! carries an identity-aware-proxy assertion header; the core sees it as a
//! verified `UserEmail`. The authentication stage is external." This
//! extractor trusts a pre-verified header and fails closed if it is absent
//! or malformed — it does not itself verify any assertion.

use crate::error::ApiError;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jit_catalog::UserContext;
use jit_kernel::UserEmail;
use std::str::FromStr;

pub const VERIFIED_EMAIL_HEADER: &str = "x-verified-email";

/// The caller's verified identity, extracted from the IAP assertion header.
pub struct Identity(pub UserEmail);

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(VERIFIED_EMAIL_HEADER)
            .ok_or(ApiError::Unauthenticated)?;
        let raw = header.to_str().map_err(|_| ApiError::Unauthenticated)?;
        let email = UserEmail::from_str(raw).map_err(|_| ApiError::Unauthenticated)?;
        Ok(Identity(email))
    }
}

impl Identity {
    pub fn into_context(self) -> UserContext {
        UserContext::new(self.0)
    }
}
