//! Key material ports. Production deployments fetch both from the cloud
//! IAM credential/JWKS APIs; those clients live outside this crate.

use crate::error::TokenError;
use async_trait::async_trait;
use jsonwebtoken::{DecodingKey, EncodingKey};

/// Key material and identity used to sign a new token.
pub struct EncodingMaterial {
    pub key: EncodingKey,
    pub kid: String,
    /// The service-account email used as both `iss` and `aud` (spec §4.6).
    pub issuer: String,
}

#[async_trait]
pub trait SigningKeySource: Send + Sync {
    async fn encoding_key(&self) -> Result<EncodingMaterial, TokenError>;
}

/// Resolves the public key for a `kid` from the signer's well-known JWKS
/// endpoint (spec §6: "well-known JWKS endpoint keyed by service-account
/// email"). Out of scope to implement the HTTP fetch here — this is the
/// seam a real JWKS client plugs into.
#[async_trait]
pub trait DecodingKeySource: Send + Sync {
    async fn decoding_key(&self, issuer: &str, kid: &str) -> Result<DecodingKey, TokenError>;
}

/// A `DecodingKeySource` that never resolves a key; used where only the
/// signer side of this crate is exercised.
#[derive(Debug, Default)]
pub struct UnimplementedJwksKeySource;

#[async_trait]
impl DecodingKeySource for UnimplementedJwksKeySource {
    async fn decoding_key(&self, _issuer: &str, _kid: &str) -> Result<DecodingKey, TokenError> {
        Err(TokenError::KeyUnavailable(
            "JWKS fetch is not implemented by this key source".to_string(),
        ))
    }
}
