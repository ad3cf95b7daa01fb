//! The closed role set and its privilege ordering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A principal's role. Exactly one per principal.
///
/// Privilege ordering is `SuperAdmin ⊇ Admin ⊇ User`. Route gating uses
/// explicit role sets; the ordering is exposed through [`Role::includes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::SuperAdmin, Role::Admin, Role::User];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::User => "USER",
        }
    }

    /// Authority name granted to a context holding this role.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "ROLE_SUPER_ADMIN",
            Role::Admin => "ROLE_ADMIN",
            Role::User => "ROLE_USER",
        }
    }

    /// Higher number = more privileges.
    pub fn level(&self) -> u8 {
        match self {
            Role::SuperAdmin => 2,
            Role::Admin => 1,
            Role::User => 0,
        }
    }

    /// True if this role carries every privilege of `other`.
    pub fn includes(&self, other: Role) -> bool {
        self.level() >= other.level()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRoleError(pub String);

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "No role found with name: {}", self.0)
    }
}

impl std::error::Error for ParseRoleError {}

impl FromStr for Role {
    type Err = ParseRoleError;

    /// Accepts both the plain name (`ADMIN`) and the authority name (`ROLE_ADMIN`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s || role.authority() == s)
            .ok_or_else(|| ParseRoleError(s.to_string()))
    }
}
