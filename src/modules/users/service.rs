use chrono::Utc;
use gatehouse_auth::AuthError;
use gatehouse_core::hash_password_with_cost;
use gatehouse_models::{Role, User, UserResponse};
use tracing::{info, instrument};

use super::model::UpdateProfileRequest;
use crate::state::AppState;

pub struct UserService;

impl UserService {
    async fn load(state: &AppState, username: &str) -> Result<User, AuthError> {
        state
            .store
            .find_by_username(username)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UserNotFound)
    }

    #[instrument(skip(state))]
    pub async fn get_profile(state: &AppState, username: &str) -> Result<UserResponse, AuthError> {
        Ok(Self::load(state, username).await?.into())
    }

    #[instrument(skip(state, dto))]
    pub async fn update_profile(
        state: &AppState,
        username: &str,
        dto: UpdateProfileRequest,
    ) -> Result<UserResponse, AuthError> {
        let mut user = Self::load(state, username).await?;

        if let Some(email) = dto.email {
            if email != user.email {
                let taken = state
                    .store
                    .find_by_email(&email)
                    .await
                    .map_err(AuthError::Store)?
                    .is_some();
                if taken {
                    return Err(AuthError::UserAlreadyExists { field: "email" });
                }
                user.email = email;
            }
        }
        if let Some(first_name) = dto.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = dto.last_name {
            user.last_name = last_name;
        }
        if let Some(password) = dto.password {
            user.password_hash =
                hash_password_with_cost(&password, state.password_config.bcrypt_cost)
                    .map_err(|e| AuthError::Internal(e.error))?;
        }
        user.updated_at = Utc::now();

        let user = state.store.save(user).await?;
        info!(user_id = %user.id, "Profile updated");
        Ok(user.into())
    }

    /// Deletes the caller's own account. The super admin cannot delete itself.
    #[instrument(skip(state))]
    pub async fn delete_profile(state: &AppState, username: &str) -> Result<(), AuthError> {
        let user = Self::load(state, username).await?;

        if user.role == Role::SuperAdmin {
            return Err(AuthError::AuthorizationDenied);
        }

        state
            .store
            .delete_by_id(user.id)
            .await
            .map_err(AuthError::Store)?;
        info!(user_id = %user.id, "Account deleted by owner");
        Ok(())
    }
}
