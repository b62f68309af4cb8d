//! Compact-JWT verification for MPA requests (spec §4.6).

use crate::claims::MpaTokenClaims;
use crate::error::TokenError;
use crate::ports::DecodingKeySource;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use std::sync::Arc;
use tracing::instrument;

pub struct JwtVerifier {
    key_source: Arc<dyn DecodingKeySource>,
    expected_party: String,
}

impl JwtVerifier {
    /// `expected_party` is the service-account email that must appear as
    /// both `iss` and `aud` (spec §4.6 treats them identically).
    pub fn new(key_source: Arc<dyn DecodingKeySource>, expected_party: impl Into<String>) -> Self {
        Self {
            key_source,
            expected_party: expected_party.into(),
        }
    }

    #[instrument(skip(self, token))]
    pub async fn verify(&self, token: &str) -> Result<MpaTokenClaims, TokenError> {
        let header = decode_header(token).map_err(|e| TokenError::Malformed(e.to_string()))?;
        let kid = header.kid.ok_or_else(|| TokenError::Malformed("missing kid".to_string()))?;

        let decoding_key = self
            .key_source
            .decoding_key(&self.expected_party, &kid)
            .await?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.expected_party.clone()]);
        validation.set_audience(&[self.expected_party.clone()]);

        let data = decode::<MpaTokenClaims>(token, &decoding_key, &validation).map_err(|e| {
            use jsonwebtoken::errors::ErrorKind;
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => TokenError::WrongParty,
                _ => TokenError::Malformed(e.to_string()),
            }
        })?;

        Ok(data.claims)
    }
}
