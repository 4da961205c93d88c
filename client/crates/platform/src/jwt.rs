//! JWT Claim Decoding
//!
//! Reads the payload segment of a JWT without verifying its signature. The
//! client only needs `exp` to decide whether to refresh; the API remains the
//! authority on validity.

use base64::{Engine, engine::general_purpose};
use serde::Deserialize;

/// Claims the portal cares about
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct TokenClaims {
    /// Expiry, Unix seconds
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at, Unix seconds
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub sub: Option<String>,
}

impl TokenClaims {
    /// Whether `exp` lies before `now_ms`; a token without `exp` never
    /// expires client-side
    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        self.exp
            .is_some_and(|exp| exp.saturating_mul(1000) < now_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    #[error("Token does not have three segments")]
    Segments,

    #[error("Token payload is not valid base64url")]
    Encoding,

    #[error("Token payload is not a JSON claims object: {0}")]
    Claims(String),
}

/// Decode the claims of `token`
pub fn decode_claims(token: &str) -> Result<TokenClaims, JwtError> {
    let parts: Vec<&str> = token.trim().split('.').collect();
    if parts.len() != 3 || parts[1].is_empty() {
        return Err(JwtError::Segments);
    }

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|_| JwtError::Encoding)?;

    serde_json::from_slice(&payload).map_err(|e| JwtError::Claims(e.to_string()))
}

/// Build an unsigned token carrying `claims` (test and fixture helper)
pub fn encode_unsigned(claims: &serde_json::Value) -> String {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = general_purpose::URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_claims() {
        let token = encode_unsigned(&json!({"exp": 1_700_000_000, "sub": "ana"}));
        let claims = decode_claims(&token).unwrap();

        assert_eq!(claims.exp, Some(1_700_000_000));
        assert_eq!(claims.sub.as_deref(), Some("ana"));
    }

    #[test]
    fn test_padded_payload_is_accepted() {
        let payload = general_purpose::URL_SAFE.encode(br#"{"exp":10}"#);
        assert!(payload.ends_with('='));
        let token = format!("h.{payload}.s");
        assert_eq!(decode_claims(&token).unwrap().exp, Some(10));
    }

    #[test]
    fn test_expiry_comparison() {
        let claims = TokenClaims {
            exp: Some(100),
            ..Default::default()
        };
        assert!(!claims.is_expired_at(100_000));
        assert!(claims.is_expired_at(100_001));
        assert!(!TokenClaims::default().is_expired_at(i64::MAX));
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(decode_claims("not-a-jwt"), Err(JwtError::Segments));
        assert_eq!(decode_claims("a..c"), Err(JwtError::Segments));
        assert_eq!(decode_claims("a.%%%.c"), Err(JwtError::Encoding));

        let not_json = general_purpose::URL_SAFE_NO_PAD.encode("hello");
        assert!(matches!(
            decode_claims(&format!("a.{not_json}.c")),
            Err(JwtError::Claims(_))
        ));
    }
}
