//! JWT claim structure shared by access and refresh tokens.

use gatehouse_models::Role;
use serde::{Deserialize, Serialize};

/// Claim names as they appear in the encoded payload.
pub mod names {
    pub const SUBJECT: &str = "sub";
    pub const ROLE: &str = "role";
    pub const PURPOSE: &str = "typ";
    pub const ISSUED_AT: &str = "iat";
    pub const EXPIRES_AT: &str = "exp";
    pub const TOKEN_ID: &str = "jti";
}

/// What a token may be used for. Access and refresh tokens differ only in
/// this tag and their lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenPurpose {
    Access,
    Refresh,
}

/// Signed token payload.
///
/// - `sub`: username of the principal
/// - `role`: role at issuance time
/// - `typ`: [`TokenPurpose`]
/// - `iat` / `exp`: Unix timestamps in seconds
/// - `jti`: random identifier, unique per issued token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub typ: TokenPurpose,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

impl Claims {
    pub fn is_expired_at(&self, now: i64) -> bool {
        self.exp <= now
    }
}
