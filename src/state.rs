use std::sync::Arc;

use gatehouse_auth::{Clock, CredentialAuthenticator, SystemClock, TokenService};
use gatehouse_config::{AppConfig, CookieConfig, CorsConfig, JwtConfig, PasswordConfig};
use gatehouse_db::init_user_store;
use gatehouse_models::UserStore;

/// Shared, immutable application state.
///
/// Everything here is loaded once at startup. Nothing request-scoped lives
/// in it: the authenticated context travels in request extensions.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub tokens: TokenService,
    pub authenticator: CredentialAuthenticator,
    pub jwt_config: JwtConfig,
    pub cookie_config: CookieConfig,
    pub password_config: PasswordConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, config: &AppConfig) -> anyhow::Result<Self> {
        Self::with_clock(store, config, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: Arc<dyn UserStore>,
        config: &AppConfig,
        clock: Arc<dyn Clock>,
    ) -> anyhow::Result<Self> {
        let authenticator = CredentialAuthenticator::new(store.clone(), &config.password)?;

        Ok(Self {
            tokens: TokenService::with_clock(&config.jwt, clock),
            authenticator,
            store,
            jwt_config: config.jwt.clone(),
            cookie_config: config.cookie.clone(),
            password_config: config.password.clone(),
            cors_config: config.cors.clone(),
        })
    }
}

pub async fn init_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let store = init_user_store(&config.database).await?;
    AppState::new(store, config)
}
