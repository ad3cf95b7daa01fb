use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use gatehouse_auth::{AuthError, AuthenticatedContext, TokenPurpose};
use gatehouse_core::AppError;
use gatehouse_models::Principal;
use tracing::{debug, error, warn};

use crate::state::AppState;
use crate::utils::cookies::extract_token;

/// Turns an optional raw access token into a request context.
///
/// Every failure degrades to [`AuthenticatedContext::Anonymous`]; route
/// guards decide whether anonymity is acceptable.
pub async fn resolve_context(state: &AppState, token: Option<&str>) -> AuthenticatedContext {
    let Some(token) = token else {
        return AuthenticatedContext::anonymous();
    };

    match authenticate_token(state, token).await {
        Ok(principal) => {
            debug!(username = %principal.username, role = %principal.role, "Request authenticated");
            AuthenticatedContext::authenticated(principal)
        }
        Err(AuthError::InvalidToken) => {
            debug!("Rejected access token, continuing anonymously");
            AuthenticatedContext::anonymous()
        }
        Err(AuthError::Store(err)) | Err(AuthError::Internal(err)) => {
            error!(error = ?err, "Could not resolve principal, continuing anonymously");
            AuthenticatedContext::anonymous()
        }
        Err(err) => {
            warn!(reason = %err, "Token subject rejected, continuing anonymously");
            AuthenticatedContext::anonymous()
        }
    }
}

/// Verifies an access token and re-resolves its subject from the store.
///
/// The store is the authority on the current role. A token whose role
/// claim no longer matches it is stale and rejected as invalid.
pub async fn authenticate_token(state: &AppState, token: &str) -> Result<Principal, AuthError> {
    let claims = state.tokens.verify(token, Some(TokenPurpose::Access))?;

    let user = state
        .store
        .find_by_username(&claims.sub)
        .await
        .map_err(AuthError::Store)?
        .ok_or(AuthError::UserNotFound)?;

    if user.role != claims.role {
        warn!(
            username = %user.username,
            token_role = %claims.role,
            current_role = %user.role,
            "Role changed since token was issued"
        );
        return Err(AuthError::InvalidToken);
    }

    Ok(user.principal())
}

/// Authentication pipeline middleware.
///
/// ```ignore
/// Router::new().layer(middleware::from_fn_with_state(state.clone(), authenticate))
/// ```
pub async fn authenticate(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let token = extract_token(req.headers(), &state.cookie_config.access_cookie_name);
    let context = resolve_context(&state, token.as_deref()).await;

    req.extensions_mut().insert(context);
    next.run(req).await
}

/// The request's context, anonymous when the pipeline did not run.
#[derive(Debug, Clone, Default)]
pub struct AuthContext(pub AuthenticatedContext);

impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(AuthContext(
            parts
                .extensions
                .get::<AuthenticatedContext>()
                .cloned()
                .unwrap_or_default(),
        ))
    }
}

/// Extractor for handlers that need an authenticated principal.
///
/// Rejects anonymous requests with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl AuthUser {
    pub fn username(&self) -> &str {
        &self.0.username
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedContext>()
            .and_then(AuthenticatedContext::principal)
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AuthError::Unauthenticated.into())
    }
}
