use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum_extra::extract::cookie::CookieJar;
use gatehouse_core::{AppError, ErrorResponse};
use gatehouse_models::UserResponse;
use tracing::instrument;

use super::model::UpdateProfileRequest;
use super::service::UserService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::utils::cookies::clear_session_cookies;
use crate::validator::ValidatedJson;

/// Get the caller's profile
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses(
        (status = 200, description = "User profile", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(username = %auth_user.username()))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::get_profile(&state, auth_user.username()).await?;
    Ok(Json(user))
}

/// Update the caller's profile
#[utoipa::path(
    put,
    path = "/api/user/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = UserResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(username = %auth_user.username()))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let user = UserService::update_profile(&state, auth_user.username(), dto).await?;
    Ok(Json(user))
}

/// Delete the caller's account and clear the session cookies
#[utoipa::path(
    delete,
    path = "/api/user/profile",
    responses(
        (status = 204, description = "Account deleted"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "The super admin account cannot be deleted", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip_all, fields(username = %auth_user.username()))]
pub async fn delete_profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
    jar: CookieJar,
) -> Result<(StatusCode, CookieJar), AppError> {
    UserService::delete_profile(&state, auth_user.username()).await?;
    Ok((
        StatusCode::NO_CONTENT,
        clear_session_cookies(jar, &state.cookie_config),
    ))
}
