//! Authentication and authorization failure taxonomy.
//!
//! Token-decode and credential-verify failures are converted into these
//! variants before they leave the component that produced them. The
//! conversion into [`AppError`] decides what a caller gets to see.

use gatehouse_core::AppError;
use gatehouse_models::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password. The two are never distinguished.
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Signature mismatch, malformed payload, wrong purpose or expiry.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No authenticated principal on a request that requires one.
    #[error("Authentication required")]
    Unauthenticated,

    #[error("{field} already exists")]
    UserAlreadyExists { field: &'static str },

    #[error("User not found")]
    UserNotFound,

    /// The caller is authenticated but lacks the required role.
    #[error("Access denied")]
    AuthorizationDenied,

    #[error("{0}")]
    RoleNotAssignable(String),

    #[error("user store failure: {0}")]
    Store(anyhow::Error),

    #[error("internal error: {0}")]
    Internal(anyhow::Error),
}

impl AuthError {
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::InvalidToken => "INVALID_TOKEN",
            AuthError::Unauthenticated => "UNAUTHENTICATED",
            AuthError::UserAlreadyExists { .. } => "USER_ALREADY_EXISTS",
            AuthError::UserNotFound => "USER_NOT_FOUND",
            AuthError::AuthorizationDenied => "ACCESS_DENIED",
            AuthError::RoleNotAssignable(_) => "ROLE_NOT_ASSIGNABLE",
            AuthError::Store(_) | AuthError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => AuthError::UserAlreadyExists { field },
            StoreError::Other(inner) => AuthError::Store(inner),
        }
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        let code = err.code();
        match err {
            AuthError::InvalidCredentials | AuthError::InvalidToken | AuthError::Unauthenticated => {
                AppError::unauthorized(code, err.to_string())
            }
            AuthError::UserAlreadyExists { .. } => AppError::conflict(code, err.to_string()),
            AuthError::UserNotFound => AppError::not_found(code, err.to_string()),
            AuthError::AuthorizationDenied | AuthError::RoleNotAssignable(_) => {
                AppError::forbidden(code, err.to_string())
            }
            AuthError::Store(inner) | AuthError::Internal(inner) => AppError::internal(inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_names_field() {
        let err = AuthError::UserAlreadyExists { field: "email" };
        assert_eq!(err.to_string(), "email already exists");

        let app: AppError = err.into();
        assert_eq!(app.status.as_u16(), 409);
        assert_eq!(app.code, "USER_ALREADY_EXISTS");
    }

    #[test]
    fn test_store_duplicate_becomes_conflict() {
        let err: AuthError = StoreError::Duplicate("username").into();
        assert!(matches!(err, AuthError::UserAlreadyExists { field: "username" }));

        let err: AuthError = StoreError::Other(anyhow::anyhow!("connection reset")).into();
        assert!(matches!(err, AuthError::Store(_)));
    }

    #[test]
    fn test_denied_is_distinct_from_invalid_token() {
        let denied: AppError = AuthError::AuthorizationDenied.into();
        let invalid: AppError = AuthError::InvalidToken.into();
        assert_eq!(denied.status.as_u16(), 403);
        assert_eq!(invalid.status.as_u16(), 401);
        assert_ne!(denied.code, invalid.code);
    }

    #[test]
    fn test_store_failure_is_generic_to_caller() {
        let app: AppError =
            AuthError::Store(anyhow::anyhow!("relation \"users\" does not exist")).into();
        assert_eq!(app.status.as_u16(), 500);
        assert_eq!(app.public_message(), "An unexpected error occurred");
    }
}
