use std::env;

/// Credentials for the super-admin account seeded at startup.
///
/// Seeding only happens when both `DEFAULT_ADMIN_USERNAME` and
/// `DEFAULT_ADMIN_PASSWORD` are set.
#[derive(Clone, Debug)]
pub struct DefaultAdminConfig {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl DefaultAdminConfig {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DEFAULT_ADMIN_USERNAME").ok()?;
        let password = env::var("DEFAULT_ADMIN_PASSWORD").ok()?;

        Some(Self {
            email: env::var("DEFAULT_ADMIN_EMAIL")
                .unwrap_or_else(|_| format!("{}@localhost", username)),
            first_name: env::var("DEFAULT_ADMIN_FIRST_NAME").unwrap_or_else(|_| "Super".to_string()),
            last_name: env::var("DEFAULT_ADMIN_LAST_NAME").unwrap_or_else(|_| "Admin".to_string()),
            username,
            password,
        })
    }
}
