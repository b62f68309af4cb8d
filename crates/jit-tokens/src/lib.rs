//! Self-describing signed MPA request tokens: compact `RS256` JWTs, plus
//! the light URL obfuscation applied to the exposed token string.

pub mod claims;
pub mod error;
pub mod obfuscation;
pub mod ports;
pub mod signer;
pub mod verifier;

pub use claims::{MpaTokenClaims, SignMpaRequest};
pub use error::TokenError;
pub use obfuscation::{deobfuscate, obfuscate};
pub use ports::{DecodingKeySource, EncodingMaterial, SigningKeySource, UnimplementedJwksKeySource};
pub use signer::{JwtSigner, TokenExpiry};
pub use verifier::JwtVerifier;
