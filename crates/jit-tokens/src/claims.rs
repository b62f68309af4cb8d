//! MPA token payload schema (spec §4.6, flat JSON).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpaTokenClaims {
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub jti: String,
    pub beneficiary: String,
    pub reviewers: Vec<String>,
    pub resource: String,
    pub role: String,
    pub justification: String,
    pub start: i64,
    pub end: i64,
}

/// The inputs needed to sign a new MPA token. A neutral DTO so this crate
/// does not depend on the activator's `MpaRequest` type.
#[derive(Debug, Clone)]
pub struct SignMpaRequest {
    pub activation_id: String,
    pub beneficiary: String,
    pub reviewers: Vec<String>,
    pub resource: String,
    pub role: String,
    pub justification: String,
    pub start: chrono::DateTime<chrono::Utc>,
    pub end: chrono::DateTime<chrono::Utc>,
}
