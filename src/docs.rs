use gatehouse_core::ErrorResponse;
use gatehouse_models::{Role, UserResponse};
use utoipa::openapi::security::{
    ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme,
};
use utoipa::{Modify, OpenApi};

use crate::modules::admin::model::UpdateRoleRequest;
use crate::modules::auth::model::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, ValidateResponse,
};
use crate::modules::users::model::UpdateProfileRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::register_user,
        crate::modules::auth::controller::login_user,
        crate::modules::auth::controller::refresh_token,
        crate::modules::auth::controller::validate_token,
        crate::modules::auth::controller::logout_user,
        crate::modules::users::controller::get_profile,
        crate::modules::users::controller::update_profile,
        crate::modules::users::controller::delete_profile,
        crate::modules::admin::controller::list_users,
        crate::modules::admin::controller::get_user,
        crate::modules::admin::controller::update_user_role,
        crate::modules::admin::controller::delete_user,
    ),
    components(
        schemas(
            Role,
            UserResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            ValidateResponse,
            MessageResponse,
            UpdateProfileRequest,
            UpdateRoleRequest,
            ErrorResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Registration, login, token refresh and logout"),
        (name = "Users", description = "The caller's own account"),
        (name = "Admin", description = "Account management for administrators")
    ),
    info(
        title = "Gatehouse API",
        version = "0.1.0",
        description = "Credential issuance and role-gated request authorization with JWT cookies.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access_token"))),
            );
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
