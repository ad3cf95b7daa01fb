use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use gatehouse_core::{AppError, ErrorResponse};
use gatehouse_models::UserResponse;
use tracing::instrument;
use uuid::Uuid;

use super::model::UpdateRoleRequest;
use super::service::AdminService;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::validator::ValidatedJson;

/// List USER and ADMIN accounts
#[utoipa::path(
    get,
    path = "/api/admin/users",
    responses(
        (status = 200, description = "Managed accounts", body = Vec<UserResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip_all, fields(admin = %admin.username()))]
pub async fn list_users(
    State(state): State<AppState>,
    admin: AuthUser,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    Ok(Json(AdminService::list_users(&state).await?))
}

/// Get an account by id
#[utoipa::path(
    get,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Account", body = UserResponse),
        (status = 403, description = "Admin role required", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip_all, fields(admin = %admin.username(), user_id = %id))]
pub async fn get_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(AdminService::get_user(&state, id).await?))
}

/// Change an account's role between USER and ADMIN
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}/role",
    params(("id" = Uuid, Path, description = "User id")),
    request_body = UpdateRoleRequest,
    responses(
        (status = 200, description = "Role updated", body = UserResponse),
        (status = 403, description = "Admin role required or role not assignable", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip_all, fields(admin = %admin.username(), user_id = %id))]
pub async fn update_user_role(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateRoleRequest>,
) -> Result<Json<UserResponse>, AppError> {
    Ok(Json(AdminService::update_role(&state, id, dto.role).await?))
}

/// Delete an account
#[utoipa::path(
    delete,
    path = "/api/admin/users/{id}",
    params(("id" = Uuid, Path, description = "User id")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "Admin role required or target is the super admin", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("cookie_auth" = []),
        ("bearer_auth" = [])
    ),
    tag = "Admin"
)]
#[instrument(skip_all, fields(admin = %admin.username(), user_id = %id))]
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    AdminService::delete_user(&state, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
