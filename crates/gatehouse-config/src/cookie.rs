use std::env;

/// Names and attributes of the cookies that carry tokens.
#[derive(Clone, Debug)]
pub struct CookieConfig {
    pub access_cookie_name: String,
    pub refresh_cookie_name: String,
    pub secure: bool,
    pub path: String,
}

impl CookieConfig {
    pub fn from_env() -> Self {
        Self {
            access_cookie_name: env::var("ACCESS_TOKEN_COOKIE")
                .unwrap_or_else(|_| "access_token".to_string()),
            refresh_cookie_name: env::var("REFRESH_TOKEN_COOKIE")
                .unwrap_or_else(|_| "refresh_token".to_string()),
            secure: env::var("COOKIE_SECURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            path: env::var("COOKIE_PATH").unwrap_or_else(|_| "/".to_string()),
        }
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            access_cookie_name: "access_token".to_string(),
            refresh_cookie_name: "refresh_token".to_string(),
            secure: true,
            path: "/".to_string(),
        }
    }
}
