use gatehouse_auth::{AuthError, AuthenticatedContext, TokenPurpose};
use gatehouse_core::hash_password_with_cost;
use gatehouse_models::{Role, User, UserResponse};
use tracing::{info, instrument};

use super::model::{LoginOutcome, LoginRequest, RegisterRequest};
use crate::state::AppState;

/// Register, login, refresh and token validation flows.
pub struct AuthService;

impl AuthService {
    /// Decides which role a registration may receive.
    ///
    /// SUPER_ADMIN is never assignable; ADMIN only by a SUPER_ADMIN caller.
    pub fn assignable_role(
        caller: &AuthenticatedContext,
        requested: Option<Role>,
    ) -> Result<Role, AuthError> {
        match requested {
            None | Some(Role::User) => Ok(Role::User),
            Some(Role::Admin) if caller.role() == Some(Role::SuperAdmin) => Ok(Role::Admin),
            Some(Role::Admin) => Err(AuthError::RoleNotAssignable(
                "Only a SUPER_ADMIN can create ADMIN accounts".to_string(),
            )),
            Some(Role::SuperAdmin) => Err(AuthError::RoleNotAssignable(
                "The SUPER_ADMIN role cannot be assigned".to_string(),
            )),
        }
    }

    /// Creates an account. Does not log the new user in.
    #[instrument(skip(state, caller, dto), fields(username = %dto.username))]
    pub async fn register(
        state: &AppState,
        caller: &AuthenticatedContext,
        dto: RegisterRequest,
    ) -> Result<UserResponse, AuthError> {
        let role = Self::assignable_role(caller, dto.role)?;

        if state
            .store
            .find_by_username(&dto.username)
            .await
            .map_err(AuthError::Store)?
            .is_some()
        {
            return Err(AuthError::UserAlreadyExists { field: "username" });
        }

        if state
            .store
            .find_by_email(&dto.email)
            .await
            .map_err(AuthError::Store)?
            .is_some()
        {
            return Err(AuthError::UserAlreadyExists { field: "email" });
        }

        let password_hash = hash_password_with_cost(&dto.password, state.password_config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(e.error))?;

        let user = User::new(
            dto.username,
            dto.email,
            password_hash,
            dto.first_name,
            dto.last_name,
            role,
        );
        let user = state.store.save(user).await?;

        info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user.into())
    }

    /// Verifies credentials and issues an access and a refresh token.
    #[instrument(skip(state, dto), fields(username = %dto.username))]
    pub async fn login(state: &AppState, dto: LoginRequest) -> Result<LoginOutcome, AuthError> {
        let user = state
            .authenticator
            .authenticate(&dto.username, &dto.password)
            .await?;
        let principal = user.principal();

        let access_token = state.tokens.issue(&principal, TokenPurpose::Access)?;
        let refresh_token = state.tokens.issue(&principal, TokenPurpose::Refresh)?;

        info!(role = %principal.role, "User logged in");
        Ok(LoginOutcome {
            access_token,
            refresh_token,
            refresh_rotated: true,
            principal,
        })
    }

    /// Mints a new access token from a refresh token.
    ///
    /// The refresh token is handed back unchanged unless rotation is
    /// enabled, in which case a fresh one is issued.
    #[instrument(skip_all)]
    pub async fn refresh(
        state: &AppState,
        refresh_token: Option<&str>,
    ) -> Result<LoginOutcome, AuthError> {
        let refresh_token = refresh_token.ok_or(AuthError::InvalidToken)?;
        let claims = state.tokens.verify(refresh_token, Some(TokenPurpose::Refresh))?;

        let user = state
            .store
            .find_by_username(&claims.sub)
            .await
            .map_err(AuthError::Store)?
            .ok_or(AuthError::UserNotFound)?;
        let principal = user.principal();

        let access_token = state.tokens.issue(&principal, TokenPurpose::Access)?;
        let rotate = state.jwt_config.rotate_refresh_tokens;
        let refresh_token = if rotate {
            state.tokens.issue(&principal, TokenPurpose::Refresh)?
        } else {
            refresh_token.to_string()
        };

        info!(username = %principal.username, rotated = rotate, "Access token refreshed");
        Ok(LoginOutcome {
            access_token,
            refresh_token,
            refresh_rotated: rotate,
            principal,
        })
    }

    /// Signature and expiry check only. A missing token is invalid.
    pub fn validate_token(state: &AppState, token: Option<&str>) -> bool {
        token.is_some_and(|token| state.tokens.validate(token))
    }
}
