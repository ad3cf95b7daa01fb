//! Role-set authorization checks.
//!
//! Protected operations declare the roles they accept. An operation that
//! accepts nobody (`&[]`) is closed to everyone.

use gatehouse_models::{Principal, Role};

use crate::context::AuthenticatedContext;
use crate::error::AuthError;

/// Roles accepted by administrative operations.
pub const ADMIN_ROLES: &[Role] = &[Role::Admin, Role::SuperAdmin];

/// Roles accepted by operations on a user's own account.
pub const USER_ROLES: &[Role] = &[Role::User, Role::Admin, Role::SuperAdmin];

pub const SUPER_ADMIN_ONLY: &[Role] = &[Role::SuperAdmin];

/// True iff the context is authenticated and its role is in `required`.
pub fn allow(context: &AuthenticatedContext, required: &[Role]) -> bool {
    context.role().is_some_and(|role| required.contains(&role))
}

/// Like [`allow`], but reports why access was refused.
///
/// Anonymous callers get [`AuthError::Unauthenticated`]; authenticated
/// callers without a matching role get [`AuthError::AuthorizationDenied`].
pub fn require<'a>(
    context: &'a AuthenticatedContext,
    required: &[Role],
) -> Result<&'a Principal, AuthError> {
    let principal = context.principal().ok_or(AuthError::Unauthenticated)?;

    if !required.contains(&principal.role) {
        tracing::warn!(
            username = %principal.username,
            role = %principal.role,
            required = ?required,
            "Authorization denied"
        );
        return Err(AuthError::AuthorizationDenied);
    }

    Ok(principal)
}
