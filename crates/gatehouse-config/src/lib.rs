//! # Gatehouse Config
//!
//! Configuration types for the Gatehouse API, loaded from environment variables:
//!
//! - [`jwt`]: signing key and token lifetimes
//! - [`cookie`]: token cookie names and attributes
//! - [`password`]: bcrypt work factor
//! - [`admin`]: default super-admin bootstrap credentials
//! - [`cors`]: allowed origins
//! - [`database`]: optional Postgres connection
//! - [`server`]: bind address
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_config::AppConfig;
//!
//! dotenvy::dotenv().ok();
//! let config = AppConfig::from_env();
//! ```

pub mod admin;
pub mod cookie;
pub mod cors;
pub mod database;
pub mod jwt;
pub mod password;
pub mod server;

// Re-export commonly used types at crate root
pub use admin::DefaultAdminConfig;
pub use cookie::CookieConfig;
pub use cors::CorsConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use password::PasswordConfig;
pub use server::ServerConfig;

/// Every configuration section, read once at process start.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub cookie: CookieConfig,
    pub password: PasswordConfig,
    pub default_admin: Option<DefaultAdminConfig>,
    pub cors: CorsConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::from_env(),
            password: PasswordConfig::from_env(),
            default_admin: DefaultAdminConfig::from_env(),
            cors: CorsConfig::from_env(),
            database: DatabaseConfig::from_env(),
            server: ServerConfig::from_env(),
        }
    }
}
