use chrono::Utc;
use gatehouse_auth::AuthError;
use gatehouse_models::{Role, User, UserResponse};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::state::AppState;

/// Roles visible to and manageable by administrators.
pub const MANAGED_ROLES: &[Role] = &[Role::User, Role::Admin];

pub struct AdminService;

impl AdminService {
    async fn load(state: &AppState, id: Uuid) -> Result<User, AuthError> {
        state
            .store
            .find_by_id(id)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UserNotFound)
    }

    /// USER and ADMIN accounts. The super admin is not listed.
    #[instrument(skip(state))]
    pub async fn list_users(state: &AppState) -> Result<Vec<UserResponse>, AuthError> {
        let users = state
            .store
            .find_all_by_role_in(MANAGED_ROLES)
            .await
            .map_err(AuthError::Store)?;

        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    #[instrument(skip(state))]
    pub async fn get_user(state: &AppState, id: Uuid) -> Result<UserResponse, AuthError> {
        Ok(Self::load(state, id).await?.into())
    }

    /// Switches an account between USER and ADMIN.
    ///
    /// Outstanding tokens carrying the old role stop authenticating on the
    /// next request.
    #[instrument(skip(state))]
    pub async fn update_role(
        state: &AppState,
        id: Uuid,
        role: Role,
    ) -> Result<UserResponse, AuthError> {
        if !MANAGED_ROLES.contains(&role) {
            return Err(AuthError::RoleNotAssignable(format!(
                "Role {} cannot be assigned",
                role
            )));
        }

        let mut user = Self::load(state, id).await?;
        if user.role == Role::SuperAdmin {
            return Err(AuthError::RoleNotAssignable(
                "The SUPER_ADMIN account's role cannot be changed".to_string(),
            ));
        }

        let previous = user.role;
        user.role = role;
        user.updated_at = Utc::now();
        let user = state.store.save(user).await?;

        info!(user_id = %id, from = %previous, to = %role, "User role updated");
        Ok(user.into())
    }

    #[instrument(skip(state))]
    pub async fn delete_user(state: &AppState, id: Uuid) -> Result<(), AuthError> {
        let user = Self::load(state, id).await?;
        if user.role == Role::SuperAdmin {
            return Err(AuthError::AuthorizationDenied);
        }

        state.store.delete_by_id(id).await.map_err(AuthError::Store)?;
        info!(user_id = %id, "User deleted");
        Ok(())
    }
}
