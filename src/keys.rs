//! RSA key material for MPA token signing/verification, loaded from PEM
//! files on disk. Production deployments resolve both sides from the cloud
//! IAM credential/JWKS APIs instead (spec §6); this is the reference
//! implementation's stand-in, grounded in `jit-tokens`' own test key
//! sources but reading real files rather than embedding a fixed keypair.

use async_trait::async_trait;
use jit_tokens::{DecodingKeySource, EncodingMaterial, SigningKeySource, TokenError};
use jsonwebtoken::{DecodingKey, EncodingKey};
use std::path::Path;

pub struct FileSigningKeySource {
    key: EncodingKey,
    kid: String,
    issuer: String,
}

impl FileSigningKeySource {
    pub fn load(
        private_key_path: impl AsRef<Path>,
        kid: impl Into<String>,
        issuer: impl Into<String>,
    ) -> Result<Self, String> {
        let pem = std::fs::read(private_key_path.as_ref())
            .map_err(|e| format!("failed to read signing key: {e}"))?;
        let key = EncodingKey::from_rsa_pem(&pem).map_err(|e| format!("invalid signing key PEM: {e}"))?;
        Ok(Self {
            key,
            kid: kid.into(),
            issuer: issuer.into(),
        })
    }
}

#[async_trait]
impl SigningKeySource for FileSigningKeySource {
    async fn encoding_key(&self) -> Result<EncodingMaterial, TokenError> {
        Ok(EncodingMaterial {
            key: self.key.clone(),
            kid: self.kid.clone(),
            issuer: self.issuer.clone(),
        })
    }
}

/// A fixed single-key `DecodingKeySource`, used because this reference
/// deployment signs and verifies with the same keypair rather than fetching
/// a remote JWKS document.
pub struct FileDecodingKeySource {
    key: DecodingKey,
}

impl FileDecodingKeySource {
    pub fn load(public_key_path: impl AsRef<Path>) -> Result<Self, String> {
        let pem = std::fs::read(public_key_path.as_ref())
            .map_err(|e| format!("failed to read verifying key: {e}"))?;
        let key =
            DecodingKey::from_rsa_pem(&pem).map_err(|e| format!("invalid verifying key PEM: {e}"))?;
        Ok(Self { key })
    }
}

#[async_trait]
impl DecodingKeySource for FileDecodingKeySource {
    async fn decoding_key(&self, _issuer: &str, _kid: &str) -> Result<DecodingKey, TokenError> {
        Ok(self.key.clone())
    }
}
