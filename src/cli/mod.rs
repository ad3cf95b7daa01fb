//! Super-admin provisioning, shared by server startup and `gatehouse-cli`.

use gatehouse_config::{DefaultAdminConfig, PasswordConfig};
use gatehouse_core::hash_password_with_cost;
use gatehouse_models::{Role, StoreError, User, UserStore};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    Created(User),
    /// A SUPER_ADMIN or an account with the configured username exists.
    AlreadyPresent,
}

/// Creates the super admin unless one already exists.
///
/// Only one SUPER_ADMIN may exist. Running this again is a no-op.
pub async fn seed_default_admin(
    store: &dyn UserStore,
    admin: &DefaultAdminConfig,
    password_config: &PasswordConfig,
) -> anyhow::Result<SeedOutcome> {
    let existing = store.find_all_by_role_in(&[Role::SuperAdmin]).await?;
    if let Some(current) = existing.first() {
        info!(username = %current.username, "Super admin already present, skipping bootstrap");
        return Ok(SeedOutcome::AlreadyPresent);
    }

    if store.find_by_username(&admin.username).await?.is_some()
        || store.find_by_email(&admin.email).await?.is_some()
    {
        warn!(
            username = %admin.username,
            "Default admin username or email taken by another account, skipping bootstrap"
        );
        return Ok(SeedOutcome::AlreadyPresent);
    }

    let password_hash = hash_password_with_cost(&admin.password, password_config.bcrypt_cost)
        .map_err(|e| e.error)?;

    let saved = store
        .save(User::new(
            admin.username.clone(),
            admin.email.clone(),
            password_hash,
            admin.first_name.clone(),
            admin.last_name.clone(),
            Role::SuperAdmin,
        ))
        .await;

    let user = match saved {
        Ok(user) => user,
        Err(StoreError::Duplicate(field)) => {
            warn!(field, "Super admin created concurrently, skipping bootstrap");
            return Ok(SeedOutcome::AlreadyPresent);
        }
        Err(err) => return Err(err.into()),
    };

    info!(username = %user.username, "Super admin created");
    Ok(SeedOutcome::Created(user))
}

/// Like [`seed_default_admin`], but an existing super admin is an error.
pub async fn create_super_admin(
    store: &dyn UserStore,
    admin: &DefaultAdminConfig,
    password_config: &PasswordConfig,
) -> anyhow::Result<User> {
    match seed_default_admin(store, admin, password_config).await? {
        SeedOutcome::Created(user) => Ok(user),
        SeedOutcome::AlreadyPresent => {
            anyhow::bail!("A super admin already exists or the username/email is taken")
        }
    }
}
