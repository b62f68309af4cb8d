//! Compact-JWT signing for MPA requests (spec §4.6).

use crate::claims::{MpaTokenClaims, SignMpaRequest};
use crate::error::TokenError;
use crate::ports::SigningKeySource;
use jit_kernel::Clock;
use jsonwebtoken::{encode, Header};
use std::sync::Arc;
use tracing::instrument;

/// Separate from the request's own `endTime`: how long the token itself
/// remains presentable, independent of the activation window it carries.
#[derive(Debug, Clone, Copy)]
pub struct TokenExpiry(pub chrono::Duration);

impl Default for TokenExpiry {
    fn default() -> Self {
        Self(chrono::Duration::hours(1))
    }
}

pub struct JwtSigner {
    key_source: Arc<dyn SigningKeySource>,
    clock: Arc<dyn Clock>,
    expiry: TokenExpiry,
}

impl JwtSigner {
    pub fn new(key_source: Arc<dyn SigningKeySource>, clock: Arc<dyn Clock>, expiry: TokenExpiry) -> Self {
        Self {
            key_source,
            clock,
            expiry,
        }
    }

    #[instrument(skip(self, request), fields(activation_id = %request.activation_id))]
    pub async fn sign(&self, request: &SignMpaRequest) -> Result<String, TokenError> {
        let material = self.key_source.encoding_key().await?;
        let issued_at = self.clock.now();

        let claims = MpaTokenClaims {
            iss: material.issuer.clone(),
            aud: material.issuer,
            exp: (issued_at + self.expiry.0).timestamp(),
            jti: request.activation_id.clone(),
            beneficiary: request.beneficiary.clone(),
            reviewers: request.reviewers.clone(),
            resource: request.resource.clone(),
            role: request.role.clone(),
            justification: request.justification.clone(),
            start: request.start.timestamp(),
            end: request.end.timestamp(),
        };

        let mut header = Header::new(jsonwebtoken::Algorithm::RS256);
        header.kid = Some(material.kid);

        encode(&header, &claims, &material.key)
            .map_err(|e| TokenError::KeyUnavailable(e.to_string()))
    }
}
