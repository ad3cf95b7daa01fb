#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use gatehouse::router::init_router;
use gatehouse::state::AppState;
use gatehouse_auth::ManualClock;
use gatehouse_config::{
    AppConfig, CookieConfig, CorsConfig, DatabaseConfig, JwtConfig, PasswordConfig, ServerConfig,
};
use gatehouse_core::hash_password_with_cost;
use gatehouse_db::InMemoryUserStore;
use gatehouse_models::{Role, User, UserStore};
use http_body_util::BodyExt;
use serde_json::Value;

pub const TEST_SECRET: &str = "gatehouse-test-secret";
pub const TEST_BCRYPT_COST: u32 = 4;
pub const ACCESS_EXPIRY: i64 = 86400;
pub const REFRESH_EXPIRY: i64 = 604800;

pub fn test_config() -> AppConfig {
    AppConfig {
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: ACCESS_EXPIRY,
            refresh_token_expiry: REFRESH_EXPIRY,
            rotate_refresh_tokens: false,
        },
        cookie: CookieConfig::default(),
        password: PasswordConfig {
            bcrypt_cost: TEST_BCRYPT_COST,
        },
        default_admin: None,
        cors: CorsConfig::default(),
        database: DatabaseConfig {
            url: None,
            max_connections: 1,
        },
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
    }
}

/// App state over an in-memory store with a manually driven clock.
pub struct TestApp {
    pub state: AppState,
    pub clock: ManualClock,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        Self::with_store(Arc::new(InMemoryUserStore::new()), config)
    }

    pub fn with_store(store: Arc<dyn UserStore>, config: AppConfig) -> Self {
        let clock = ManualClock::starting_now();
        let state = AppState::with_clock(store, &config, Arc::new(clock.clone())).unwrap();
        Self { state, clock }
    }

    pub fn router(&self) -> Router {
        init_router(self.state.clone())
    }

    pub async fn create_user(&self, username: &str, password: &str, role: Role) -> User {
        let hash = hash_password_with_cost(password, TEST_BCRYPT_COST).unwrap();
        let user = User::new(
            username,
            format!("{}@example.com", username),
            hash,
            "Test",
            "User",
            role,
        );
        self.state.store.save(user).await.unwrap()
    }
}

pub fn json_request(method: &str, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Raw `Set-Cookie` header values keyed by cookie name.
pub fn set_cookies(response: &Response<Body>) -> HashMap<String, String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|raw| {
            let name = raw.split('=').next()?.trim().to_string();
            Some((name, raw.to_string()))
        })
        .collect()
}

/// The value part of a `Set-Cookie` header.
pub fn cookie_value(set_cookie: &str) -> String {
    set_cookie
        .split(';')
        .next()
        .and_then(|pair| pair.split_once('='))
        .map(|(_, value)| value.to_string())
        .unwrap_or_default()
}

/// Logs in through the router and returns `(access_token, refresh_token)`.
pub async fn login(app: &TestApp, username: &str, password: &str) -> (String, String) {
    use tower::ServiceExt;

    let response = app
        .router()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            serde_json::json!({ "username": username, "password": password }),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), axum::http::StatusCode::OK);

    let cookies = set_cookies(&response);
    (
        cookie_value(&cookies["access_token"]),
        cookie_value(&cookies["refresh_token"]),
    )
}

pub fn access_cookie(token: &str) -> String {
    format!("access_token={}", token)
}

pub fn refresh_cookie(token: &str) -> String {
    format!("refresh_token={}", token)
}
