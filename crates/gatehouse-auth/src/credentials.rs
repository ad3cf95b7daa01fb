//! Username/password verification against the user store.

use std::fmt;
use std::sync::Arc;

use gatehouse_config::PasswordConfig;
use gatehouse_core::{hash_password_with_cost, verify_password};
use gatehouse_models::{User, UserStore};

use crate::error::AuthError;

/// Verifies submitted credentials.
///
/// An unknown username and a wrong password produce the same
/// [`AuthError::InvalidCredentials`]. For unknown usernames a verify against
/// a throwaway hash of the same cost still runs, so both paths take
/// comparable time.
#[derive(Clone)]
pub struct CredentialAuthenticator {
    store: Arc<dyn UserStore>,
    dummy_hash: Arc<str>,
}

impl CredentialAuthenticator {
    pub fn new(store: Arc<dyn UserStore>, config: &PasswordConfig) -> Result<Self, AuthError> {
        let dummy_hash = hash_password_with_cost("gatehouse-dummy-password", config.bcrypt_cost)
            .map_err(|e| AuthError::Internal(e.error))?;

        Ok(Self {
            store,
            dummy_hash: dummy_hash.into(),
        })
    }

    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .store
            .find_by_username(username)
            .await
            .map_err(AuthError::Store)?;

        let Some(user) = user else {
            let _ = verify_password(password, &self.dummy_hash);
            tracing::debug!("Login attempt for unknown username");
            return Err(AuthError::InvalidCredentials);
        };

        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => {
                tracing::debug!(username = %user.username, "Password mismatch");
                Err(AuthError::InvalidCredentials)
            }
            Err(e) => {
                tracing::error!(username = %user.username, error = %e, "Stored password hash is unreadable");
                Err(AuthError::InvalidCredentials)
            }
        }
    }
}

impl fmt::Debug for CredentialAuthenticator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialAuthenticator").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatehouse_db::InMemoryUserStore;
    use gatehouse_models::Role;

    const TEST_COST: u32 = 4;

    async fn setup() -> CredentialAuthenticator {
        let store = Arc::new(InMemoryUserStore::new());
        let hash = hash_password_with_cost("pw1", TEST_COST).unwrap();
        store
            .save(User::new("alice", "alice@example.com", hash, "Alice", "Liddell", Role::User))
            .await
            .unwrap();

        CredentialAuthenticator::new(store, &PasswordConfig { bcrypt_cost: TEST_COST }).unwrap()
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let authenticator = setup().await;
        let user = authenticator.authenticate("alice", "pw1").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.role, Role::User);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
        let authenticator = setup().await;

        let wrong_password = authenticator.authenticate("alice", "wrong").await.unwrap_err();
        let unknown_user = authenticator.authenticate("mallory", "pw1").await.unwrap_err();

        assert!(matches!(wrong_password, AuthError::InvalidCredentials));
        assert!(matches!(unknown_user, AuthError::InvalidCredentials));
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[tokio::test]
    async fn test_corrupt_hash_fails_closed() {
        let store = Arc::new(InMemoryUserStore::new());
        store
            .save(User::new("bob", "bob@example.com", "not-a-hash", "Bob", "B", Role::User))
            .await
            .unwrap();
        let authenticator =
            CredentialAuthenticator::new(store, &PasswordConfig { bcrypt_cost: TEST_COST }).unwrap();

        assert!(matches!(
            authenticator.authenticate("bob", "anything").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
