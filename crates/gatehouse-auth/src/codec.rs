//! Compact signed encoding of [`Claims`].
//!
//! Tokens are HS256 JWTs: the signature covers header and payload, so any
//! change to either is detected. The codec checks the signature only;
//! expiry and purpose are business rules enforced by
//! [`TokenService`](crate::tokens::TokenService) against its clock.

use std::fmt;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::claims::Claims;
use crate::error::AuthError;

#[derive(Clone)]
pub struct ClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    header: Header,
    validation: Validation,
}

impl ClaimsCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.required_spec_claims.clear();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            header: Header::new(Algorithm::HS256),
            validation,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&self.header, claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(anyhow::anyhow!("Failed to create token: {}", e)))
    }

    /// Verifies the signature and deserializes the payload.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_as(token)
    }

    /// Verifies the signature and returns the raw claim map.
    pub fn decode_map(&self, token: &str) -> Result<Map<String, Value>, AuthError> {
        self.decode_as(token)
    }

    fn decode_as<T: DeserializeOwned>(&self, token: &str) -> Result<T, AuthError> {
        decode::<T>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Token decode failed");
                AuthError::InvalidToken
            })
    }
}

impl fmt::Debug for ClaimsCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimsCodec")
            .field("algorithm", &self.header.alg)
            .field("key", &"[redacted]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::TokenPurpose;
    use gatehouse_models::Role;

    fn sample_claims() -> Claims {
        Claims {
            sub: "alice".to_string(),
            role: Role::Admin,
            typ: TokenPurpose::Access,
            iat: 1_000,
            exp: 2_000,
            jti: "jti".to_string(),
        }
    }

    #[test]
    fn test_decode_ignores_expiry() {
        // exp is far in the past; the codec only checks the signature.
        let codec = ClaimsCodec::new(b"test-secret-key-at-least-32-characters-long");
        let token = codec.encode(&sample_claims()).unwrap();
        assert_eq!(codec.decode(&token).unwrap(), sample_claims());
    }

    #[test]
    fn test_decode_wrong_key() {
        let codec = ClaimsCodec::new(b"test-secret-key-at-least-32-characters-long");
        let other = ClaimsCodec::new(b"different-secret-key-at-least-32-characters");
        let token = codec.encode(&sample_claims()).unwrap();
        assert!(matches!(other.decode(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let codec = ClaimsCodec::new(b"test-secret-key-at-least-32-characters-long");
        let token = codec.encode(&sample_claims()).unwrap();

        let mut forged = sample_claims();
        forged.role = Role::SuperAdmin;
        let forged_token = codec.encode(&forged).unwrap();

        // Splice the forged payload onto the original signature.
        let original: Vec<&str> = token.split('.').collect();
        let tampered: Vec<&str> = forged_token.split('.').collect();
        let spliced = format!("{}.{}.{}", original[0], tampered[1], original[2]);

        assert!(matches!(codec.decode(&spliced), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_malformed_tokens() {
        let codec = ClaimsCodec::new(b"test-secret-key-at-least-32-characters-long");
        for token in ["", "invalid-token", "not.enough", "!!!.invalid.chars", ".payload.sig"] {
            assert!(codec.decode(token).is_err(), "accepted {token:?}");
        }
    }

    #[test]
    fn test_debug_redacts_key() {
        let codec = ClaimsCodec::new(b"super-secret");
        assert!(!format!("{:?}", codec).contains("super-secret"));
    }
}
