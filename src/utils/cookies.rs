//! Token transport over cookies.
//!
//! Access and refresh tokens each travel in their own HTTP-only cookie,
//! scoped to the configured path, with a max-age equal to the token
//! lifetime. Removing a cookie re-sends it empty with max-age 0.

use axum::http::{HeaderMap, header};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use gatehouse_config::CookieConfig;

fn token_cookie(
    config: &CookieConfig,
    name: &str,
    value: String,
    max_age_secs: i64,
) -> Cookie<'static> {
    Cookie::build((name.to_string(), value))
        .path(config.path.clone())
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(max_age_secs))
        .build()
}

/// Adds the access token cookie to the jar.
pub fn set_access_cookie(
    jar: CookieJar,
    config: &CookieConfig,
    access_token: String,
    max_age: i64,
) -> CookieJar {
    jar.add(token_cookie(
        config,
        &config.access_cookie_name,
        access_token,
        max_age,
    ))
}

/// Adds both token cookies to the jar.
pub fn set_session_cookies(
    jar: CookieJar,
    config: &CookieConfig,
    access_token: String,
    access_max_age: i64,
    refresh_token: String,
    refresh_max_age: i64,
) -> CookieJar {
    set_access_cookie(jar, config, access_token, access_max_age).add(token_cookie(
        config,
        &config.refresh_cookie_name,
        refresh_token,
        refresh_max_age,
    ))
}

/// Overwrites both token cookies with empty, immediately expiring ones.
pub fn clear_session_cookies(jar: CookieJar, config: &CookieConfig) -> CookieJar {
    jar.add(token_cookie(config, &config.access_cookie_name, String::new(), 0))
        .add(token_cookie(config, &config.refresh_cookie_name, String::new(), 0))
}

/// Reads a token from the named cookie, falling back to `Authorization: Bearer`.
///
/// Empty values count as absent.
pub fn extract_token(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let from_cookie = CookieJar::from_headers(headers)
        .get(cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|token| !token.is_empty());

    from_cookie.or_else(|| {
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty())
    })
}
