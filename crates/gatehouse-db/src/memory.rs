use std::collections::HashMap;

use async_trait::async_trait;
use gatehouse_models::{Role, StoreError, User, UserStore};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local user store.
///
/// Used by the test suite and when no `DATABASE_URL` is configured.
/// Usernames and emails are unique, as in the Postgres schema.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_all_by_role_in(&self, roles: &[Role]) -> anyhow::Result<Vec<User>> {
        let users = self.users.read().await;
        let mut matching: Vec<User> = users
            .values()
            .filter(|u| roles.contains(&u.role))
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.username.cmp(&b.username)));
        Ok(matching)
    }

    async fn save(&self, user: User) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        if let Some(other) = users
            .values()
            .find(|u| u.id != user.id && (u.username == user.username || u.email == user.email))
        {
            let field = if other.username == user.username {
                "username"
            } else {
                "email"
            };
            return Err(StoreError::Duplicate(field));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn exists_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        Ok(self.users.read().await.contains_key(&id))
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        self.users.write().await.remove(&id);
        Ok(())
    }
}
