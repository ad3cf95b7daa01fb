//! Role-gating middleware for Axum routers.
//!
//! These run as `route_layer`s after [`authenticate`](super::auth::authenticate)
//! has placed an [`AuthenticatedContext`] in the request extensions.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use gatehouse_auth::{
    AuthenticatedContext,
    guard::{self, ADMIN_ROLES, USER_ROLES},
};
use gatehouse_core::AppError;
use gatehouse_models::Role;

/// Admits the request only if its principal holds one of `required`.
///
/// ```rust,ignore
/// let routes = Router::new()
///     .route("/reports", get(reports))
///     .route_layer(middleware::from_fn(|req, next| {
///         require_roles(req, next, &[Role::SuperAdmin])
///     }));
/// ```
pub async fn require_roles(req: Request, next: Next, required: &[Role]) -> Result<Response, AppError> {
    let context = req
        .extensions()
        .get::<AuthenticatedContext>()
        .cloned()
        .unwrap_or_default();

    guard::require(&context, required)?;

    Ok(next.run(req).await)
}

/// ADMIN and SUPER_ADMIN only.
///
/// ```rust,ignore
/// let admin_routes = init_admin_router().route_layer(middleware::from_fn(require_admin));
/// ```
pub async fn require_admin(req: Request, next: Next) -> Response {
    match require_roles(req, next, ADMIN_ROLES).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

/// Any authenticated role.
pub async fn require_user(req: Request, next: Next) -> Response {
    match require_roles(req, next, USER_ROLES).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}
