use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum_extra::extract::cookie::CookieJar;
use gatehouse_auth::TokenPurpose;
use gatehouse_core::{AppError, ErrorResponse};
use gatehouse_models::UserResponse;
use tracing::{info, instrument};

use super::model::{
    AuthResponse, LoginOutcome, LoginRequest, MessageResponse, RegisterRequest, ValidateResponse,
};
use super::service::AuthService;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;
use crate::utils::cookies::{
    clear_session_cookies, extract_token, set_access_cookie, set_session_cookies,
};
use crate::validator::ValidatedJson;

fn with_session_cookies(state: &AppState, jar: CookieJar, outcome: &LoginOutcome) -> CookieJar {
    let access_max_age = state.tokens.lifetime(TokenPurpose::Access);
    let refresh_max_age = state.tokens.lifetime(TokenPurpose::Refresh);

    if outcome.refresh_rotated {
        set_session_cookies(
            jar,
            &state.cookie_config,
            outcome.access_token.clone(),
            access_max_age,
            outcome.refresh_token.clone(),
            refresh_max_age,
        )
    } else {
        set_access_cookie(
            jar,
            &state.cookie_config,
            outcome.access_token.clone(),
            access_max_age,
        )
    }
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User registered", body = UserResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 403, description = "Requested role cannot be assigned by this caller", body = ErrorResponse),
        (status = 409, description = "Username or email already exists", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn register_user(
    State(state): State<AppState>,
    AuthContext(caller): AuthContext,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = AuthService::register(&state, &caller, dto).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Logged in; tokens set as cookies", body = AuthResponse),
        (status = 401, description = "Invalid username or password", body = ErrorResponse),
        (status = 422, description = "Validation error", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    jar: CookieJar,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let outcome = AuthService::login(&state, dto).await?;
    let jar = with_session_cookies(&state, jar, &outcome);

    Ok((jar, Json(AuthResponse::new(outcome.principal, "Login successful"))))
}

/// Exchange the refresh cookie for a new access token
#[utoipa::path(
    post,
    path = "/api/auth/refresh",
    responses(
        (status = 200, description = "Access token refreshed", body = AuthResponse),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse),
        (status = 404, description = "Token subject no longer exists", body = ErrorResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthResponse>), AppError> {
    let presented = jar
        .get(&state.cookie_config.refresh_cookie_name)
        .map(|cookie| cookie.value().to_string());

    let outcome = AuthService::refresh(&state, presented.as_deref()).await?;
    let jar = with_session_cookies(&state, jar, &outcome);

    Ok((jar, Json(AuthResponse::new(outcome.principal, "Token refreshed"))))
}

/// Check whether the presented access token is valid
#[utoipa::path(
    post,
    path = "/api/auth/validate",
    responses(
        (status = 200, description = "Validation result", body = ValidateResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<ValidateResponse> {
    let token = extract_token(&headers, &state.cookie_config.access_cookie_name);
    Json(ValidateResponse {
        valid: AuthService::validate_token(&state, token.as_deref()),
    })
}

/// Clear the session cookies
///
/// Issued tokens stay valid until they expire.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session cookies cleared", body = MessageResponse)
    ),
    tag = "Authentication"
)]
#[instrument(skip_all)]
pub async fn logout_user(
    State(state): State<AppState>,
    AuthContext(context): AuthContext,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    if let Some(username) = context.username() {
        info!(username = %username, "User logged out");
    }

    (
        clear_session_cookies(jar, &state.cookie_config),
        Json(MessageResponse {
            message: "Logout successful".to_string(),
        }),
    )
}
