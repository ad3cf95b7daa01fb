use axum::{
    Router,
    routing::{get, put},
};

use super::controller::{delete_user, get_user, list_users, update_user_role};
use crate::state::AppState;

pub fn init_admin_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
        .route("/users/{id}/role", put(update_user_role))
}
