//! The user store contract.
//!
//! The store is the sole source of truth for a principal's current role and
//! credential hash. Implementations live in `gatehouse-db`.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::roles::Role;
use crate::users::User;

/// Failure of [`UserStore::save`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// Another user already holds the named unique field.
    #[error("duplicate {0}")]
    Duplicate(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;

    async fn find_all_by_role_in(&self, roles: &[Role]) -> anyhow::Result<Vec<User>>;

    /// Inserts the user, or replaces the stored record with the same id.
    ///
    /// Uniqueness of username and email is enforced here, so a save that
    /// loses a race against a concurrent one fails with
    /// [`StoreError::Duplicate`] rather than a generic error.
    async fn save(&self, user: User) -> Result<User, StoreError>;

    async fn exists_by_id(&self, id: Uuid) -> anyhow::Result<bool>;

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()>;
}
