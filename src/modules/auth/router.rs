use axum::{Router, routing::post};

use super::controller::{login_user, logout_user, refresh_token, register_user, validate_token};
use crate::state::AppState;

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_user))
        .route("/login", post(login_user))
        .route("/refresh", post(refresh_token))
        .route("/validate", post(validate_token))
        .route("/logout", post(logout_user))
}
