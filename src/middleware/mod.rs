//! Request authentication and role gating.
//!
//! - [`auth`]: the per-request authentication pipeline and the extractors
//!   that read its result
//! - [`role`]: route-layer middleware that admits only certain roles
//!
//! # Request flow
//!
//! 1. [`auth::authenticate`] runs on every request. It reads the access token
//!    from the access cookie (or `Authorization: Bearer`), verifies it,
//!    re-resolves the user from the store and stores an
//!    [`AuthenticatedContext`](gatehouse_auth::AuthenticatedContext) in the
//!    request extensions. It never rejects a request.
//! 2. [`role::require_user`] / [`role::require_admin`] reject anonymous
//!    (401) and under-privileged (403) callers on protected routers.
//! 3. Handlers read the context through [`auth::AuthContext`] or
//!    [`auth::AuthUser`].
//!
//! ```ignore
//! async fn get_profile(AuthUser(principal): AuthUser) -> impl IntoResponse {
//!     // principal.username, principal.role
//! }
//! ```

pub mod auth;
pub mod role;
