//! URL-borne token obfuscation (spec §4.6, §9 open question).
//!
//! Defense in depth only: authorization still requires the reviewer's
//! IAP-authenticated identity and a live eligibility check. Any reversible,
//! URL-safe encoding is acceptable here; this applies a fixed XOR mask
//! before base64url encoding so the raw JWT does not appear verbatim in
//! URLs or server logs.

use crate::error::TokenError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

const MASK: u8 = 0x5a;

fn xor(bytes: &[u8]) -> Vec<u8> {
    bytes.iter().map(|b| b ^ MASK).collect()
}

pub fn obfuscate(jwt: &str) -> String {
    URL_SAFE_NO_PAD.encode(xor(jwt.as_bytes()))
}

pub fn deobfuscate(token: &str) -> Result<String, TokenError> {
    let decoded = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| TokenError::Malformed(e.to_string()))?;
    String::from_utf8(xor(&decoded)).map_err(|e| TokenError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obfuscation_round_trips() {
        let jwt = "header.payload.signature";
        let obfuscated = obfuscate(jwt);
        assert_ne!(obfuscated, jwt);
        assert_eq!(deobfuscate(&obfuscated).unwrap(), jwt);
    }

    #[test]
    fn deobfuscate_rejects_invalid_base64() {
        assert!(deobfuscate("not valid base64!!").is_err());
    }
}
