pub mod admin;
pub mod auth;
pub mod users;

pub use self::auth::model::LoginRequest;
pub use self::auth::service::AuthService;
