//! Token issuance and validation.
//!
//! [`TokenService`] owns the signing key and the lifetime policy. It is
//! immutable after construction and cheap to clone, so one instance is
//! shared by every request.
//!
//! # Validation rules
//!
//! A token is valid when all of the following hold:
//!
//! - it decodes and its HS256 signature matches the service key
//! - `exp > now` according to the service [`Clock`] (no leeway)
//! - for [`TokenService::validate_for`], its purpose tag matches
//!
//! Validation fails closed: every failure is reported as `false` or
//! [`AuthError::InvalidToken`], never as a panic or an internal error.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_auth::{TokenPurpose, TokenService};
//!
//! let tokens = TokenService::new(&jwt_config);
//! let access = tokens.issue(&principal, TokenPurpose::Access)?;
//! assert!(tokens.validate(&access));
//! assert_eq!(tokens.extract_subject(&access)?, principal.username);
//! ```

use std::fmt;
use std::sync::Arc;

use gatehouse_config::JwtConfig;
use gatehouse_models::{Principal, Role};
use serde_json::Value;
use uuid::Uuid;

use crate::claims::{Claims, TokenPurpose, names};
use crate::clock::{Clock, SystemClock};
use crate::codec::ClaimsCodec;
use crate::error::AuthError;

#[derive(Clone)]
pub struct TokenService {
    codec: ClaimsCodec,
    access_token_expiry: i64,
    refresh_token_expiry: i64,
    clock: Arc<dyn Clock>,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            codec: ClaimsCodec::new(config.secret.as_bytes()),
            access_token_expiry: config.access_token_expiry,
            refresh_token_expiry: config.refresh_token_expiry,
            clock,
        }
    }

    /// Lifetime in seconds for tokens of the given purpose.
    pub fn lifetime(&self, purpose: TokenPurpose) -> i64 {
        match purpose {
            TokenPurpose::Access => self.access_token_expiry,
            TokenPurpose::Refresh => self.refresh_token_expiry,
        }
    }

    pub fn now(&self) -> i64 {
        self.clock.now()
    }

    pub fn issue(&self, principal: &Principal, purpose: TokenPurpose) -> Result<String, AuthError> {
        let now = self.clock.now();
        let exp = now.checked_add(self.lifetime(purpose)).ok_or_else(|| {
            AuthError::Internal(anyhow::anyhow!(
                "{:?} token lifetime of {}s overflows the expiry timestamp",
                purpose,
                self.lifetime(purpose)
            ))
        })?;
        let claims = Claims {
            sub: principal.username.clone(),
            role: principal.role,
            typ: purpose,
            iat: now,
            exp,
            jti: Uuid::new_v4().to_string(),
        };

        self.codec.encode(&claims)
    }

    /// Signature and expiry check, any purpose.
    pub fn validate(&self, token: &str) -> bool {
        self.verify(token, None).is_ok()
    }

    /// Signature, expiry and purpose check.
    pub fn validate_for(&self, token: &str, purpose: TokenPurpose) -> bool {
        self.verify(token, Some(purpose)).is_ok()
    }

    /// Returns the claims of a token that passes validation.
    pub fn verify(&self, token: &str, purpose: Option<TokenPurpose>) -> Result<Claims, AuthError> {
        let claims = self.codec.decode(token)?;

        if claims.is_expired_at(self.clock.now()) {
            tracing::debug!(sub = %claims.sub, exp = claims.exp, "Token expired");
            return Err(AuthError::InvalidToken);
        }

        if let Some(expected) = purpose {
            if claims.typ != expected {
                tracing::debug!(
                    sub = %claims.sub,
                    expected = ?expected,
                    actual = ?claims.typ,
                    "Token purpose mismatch"
                );
                return Err(AuthError::InvalidToken);
            }
        }

        Ok(claims)
    }

    /// Reads one claim after checking the signature only.
    ///
    /// Expiry is not checked here: call [`validate`](Self::validate) first.
    pub fn extract_claim(&self, token: &str, name: &str) -> Result<Value, AuthError> {
        self.codec
            .decode_map(token)?
            .remove(name)
            .ok_or(AuthError::InvalidToken)
    }

    pub fn extract_subject(&self, token: &str) -> Result<String, AuthError> {
        match self.extract_claim(token, names::SUBJECT)? {
            Value::String(subject) => Ok(subject),
            _ => Err(AuthError::InvalidToken),
        }
    }

    pub fn extract_role(&self, token: &str) -> Result<Role, AuthError> {
        self.extract_claim(token, names::ROLE)?
            .as_str()
            .and_then(|role| role.parse().ok())
            .ok_or(AuthError::InvalidToken)
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("codec", &self.codec)
            .field("access_token_expiry", &self.access_token_expiry)
            .field("refresh_token_expiry", &self.refresh_token_expiry)
            .field("clock", &self.clock)
            .finish()
    }
}
