mod common;

use std::sync::Arc;

use async_trait::async_trait;
use common::{ACCESS_EXPIRY, REFRESH_EXPIRY, TestApp, test_config};
use gatehouse::modules::auth::model::{LoginRequest, RegisterRequest};
use gatehouse::modules::auth::service::AuthService;
use gatehouse::modules::users::model::UpdateProfileRequest;
use gatehouse::modules::users::service::UserService;
use gatehouse_auth::{AuthError, AuthenticatedContext, TokenPurpose};
use gatehouse_db::InMemoryUserStore;
use gatehouse_models::{Principal, Role, StoreError, User, UserStore};
use uuid::Uuid;

fn register_request(username: &str, password: &str, role: Option<Role>) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: password.to_string(),
        email: format!("{}@example.com", username),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        role,
    }
}

fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}

fn caller(role: Role) -> AuthenticatedContext {
    AuthenticatedContext::authenticated(Principal::bare("caller", role))
}

#[tokio::test]
async fn test_full_session_lifecycle() {
    let app = TestApp::new();
    let state = &app.state;

    let created = AuthService::register(
        state,
        &AuthenticatedContext::anonymous(),
        register_request("alice", "pw1", None),
    )
    .await
    .unwrap();
    assert_eq!(created.role, Role::User);

    let outcome = AuthService::login(state, login_request("alice", "pw1"))
        .await
        .unwrap();
    assert!(!outcome.access_token.is_empty());
    assert!(!outcome.refresh_token.is_empty());
    assert_eq!(outcome.principal.role, Role::User);

    let wrong = AuthService::login(state, login_request("alice", "wrong")).await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredentials)));

    assert!(AuthService::validate_token(state, Some(&outcome.access_token)));

    app.clock.advance(ACCESS_EXPIRY + 1);
    assert!(!AuthService::validate_token(state, Some(&outcome.access_token)));

    let refreshed = AuthService::refresh(state, Some(&outcome.refresh_token))
        .await
        .unwrap();
    assert!(AuthService::validate_token(state, Some(&refreshed.access_token)));
    assert_eq!(
        state.tokens.extract_subject(&refreshed.access_token).unwrap(),
        "alice"
    );
}

#[tokio::test]
async fn test_unknown_user_and_wrong_password_are_indistinguishable() {
    let app = TestApp::new();
    app.create_user("bob", "correct", Role::User).await;

    let wrong_password = AuthService::login(&app.state, login_request("bob", "nope"))
        .await
        .unwrap_err();
    let unknown_user = AuthService::login(&app.state, login_request("nobody", "nope"))
        .await
        .unwrap_err();

    assert!(matches!(wrong_password, AuthError::InvalidCredentials));
    assert!(matches!(unknown_user, AuthError::InvalidCredentials));
    assert_eq!(wrong_password.to_string(), unknown_user.to_string());
}

#[tokio::test]
async fn test_register_admin_requires_super_admin_caller() {
    let app = TestApp::new();

    for context in [
        AuthenticatedContext::anonymous(),
        caller(Role::User),
        caller(Role::Admin),
    ] {
        let result =
            AuthService::register(&app.state, &context, register_request("eve", "pw", Some(Role::Admin)))
                .await;
        assert!(matches!(result, Err(AuthError::RoleNotAssignable(_))));
    }

    let created = AuthService::register(
        &app.state,
        &caller(Role::SuperAdmin),
        register_request("carol", "pw", Some(Role::Admin)),
    )
    .await
    .unwrap();
    assert_eq!(created.role, Role::Admin);
}

#[tokio::test]
async fn test_register_super_admin_always_fails() {
    let app = TestApp::new();

    for context in [
        AuthenticatedContext::anonymous(),
        caller(Role::User),
        caller(Role::Admin),
        caller(Role::SuperAdmin),
    ] {
        let result = AuthService::register(
            &app.state,
            &context,
            register_request("mallory", "pw", Some(Role::SuperAdmin)),
        )
        .await;
        assert!(matches!(result, Err(AuthError::RoleNotAssignable(_))));
    }
    assert!(
        app.state
            .store
            .find_by_username("mallory")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_register_rejects_duplicates_naming_field() {
    let app = TestApp::new();
    let anonymous = AuthenticatedContext::anonymous();

    AuthService::register(&app.state, &anonymous, register_request("dave", "pw", None))
        .await
        .unwrap();

    let same_username =
        AuthService::register(&app.state, &anonymous, register_request("dave", "pw", None))
            .await
            .unwrap_err();
    assert!(matches!(
        same_username,
        AuthError::UserAlreadyExists { field: "username" }
    ));

    let mut other = register_request("dave2", "pw", None);
    other.email = "dave@example.com".to_string();
    let same_email = AuthService::register(&app.state, &anonymous, other)
        .await
        .unwrap_err();
    assert!(matches!(
        same_email,
        AuthError::UserAlreadyExists { field: "email" }
    ));
}

/// Store whose uniqueness lookups never see existing rows, the view a
/// request gets when a concurrent one commits between check and save.
struct StaleLookupStore(InMemoryUserStore);

#[async_trait]
impl UserStore for StaleLookupStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let found = self.0.find_by_username(username).await?;
        // The caller's own record is still visible so profile updates can load it.
        Ok(found.filter(|u| u.username == "alice"))
    }

    async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
        Ok(None)
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        self.0.find_by_id(id).await
    }

    async fn find_all_by_role_in(&self, roles: &[Role]) -> anyhow::Result<Vec<User>> {
        self.0.find_all_by_role_in(roles).await
    }

    async fn save(&self, user: User) -> Result<User, StoreError> {
        self.0.save(user).await
    }

    async fn exists_by_id(&self, id: Uuid) -> anyhow::Result<bool> {
        self.0.exists_by_id(id).await
    }

    async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
        self.0.delete_by_id(id).await
    }
}

#[tokio::test]
async fn test_register_duplicate_caught_at_save_is_conflict() {
    let app = TestApp::with_store(
        Arc::new(StaleLookupStore(InMemoryUserStore::new())),
        test_config(),
    );
    let anonymous = AuthenticatedContext::anonymous();

    AuthService::register(&app.state, &anonymous, register_request("bob", "pw", None))
        .await
        .unwrap();

    let again = AuthService::register(&app.state, &anonymous, register_request("bob", "pw", None))
        .await
        .unwrap_err();
    assert!(matches!(again, AuthError::UserAlreadyExists { field: "username" }));

    let mut same_email = register_request("robert", "pw", None);
    same_email.email = "bob@example.com".to_string();
    let err = AuthService::register(&app.state, &anonymous, same_email)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists { field: "email" }));
}

#[tokio::test]
async fn test_profile_email_duplicate_caught_at_save_is_conflict() {
    let app = TestApp::with_store(
        Arc::new(StaleLookupStore(InMemoryUserStore::new())),
        test_config(),
    );
    app.create_user("alice", "pw", Role::User).await;
    app.create_user("bob", "pw", Role::User).await;

    let err = UserService::update_profile(
        &app.state,
        "alice",
        UpdateProfileRequest {
            email: Some("bob@example.com".to_string()),
            first_name: None,
            last_name: None,
            password: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists { field: "email" }));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_yield_one_conflict() {
    for _ in 0..10 {
        let app = TestApp::new();

        let attempts: Vec<_> = (0..2)
            .map(|_| {
                let state = app.state.clone();
                tokio::spawn(async move {
                    AuthService::register(
                        &state,
                        &AuthenticatedContext::anonymous(),
                        register_request("carol", "pw", None),
                    )
                    .await
                })
            })
            .collect();

        let mut created = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => created += 1,
                Err(err) => {
                    assert!(
                        matches!(err, AuthError::UserAlreadyExists { field: "username" }),
                        "unexpected error: {err:?}"
                    );
                }
            }
        }
        assert_eq!(created, 1);
    }
}

#[tokio::test]
async fn test_refresh_rejects_access_token_and_missing_token() {
    let app = TestApp::new();
    app.create_user("frank", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("frank", "pw"))
        .await
        .unwrap();

    let with_access = AuthService::refresh(&app.state, Some(&outcome.access_token)).await;
    assert!(matches!(with_access, Err(AuthError::InvalidToken)));

    let missing = AuthService::refresh(&app.state, None).await;
    assert!(matches!(missing, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_refresh_reuses_token_by_default() {
    let app = TestApp::new();
    app.create_user("grace", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("grace", "pw"))
        .await
        .unwrap();

    let refreshed = AuthService::refresh(&app.state, Some(&outcome.refresh_token))
        .await
        .unwrap();
    assert_eq!(refreshed.refresh_token, outcome.refresh_token);
    assert!(!refreshed.refresh_rotated);
}

#[tokio::test]
async fn test_refresh_rotates_when_enabled() {
    let mut config = test_config();
    config.jwt.rotate_refresh_tokens = true;
    let app = TestApp::with_config(config);
    app.create_user("heidi", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("heidi", "pw"))
        .await
        .unwrap();

    let refreshed = AuthService::refresh(&app.state, Some(&outcome.refresh_token))
        .await
        .unwrap();
    assert!(refreshed.refresh_rotated);
    assert_ne!(refreshed.refresh_token, outcome.refresh_token);
    assert!(
        app.state
            .tokens
            .validate_for(&refreshed.refresh_token, TokenPurpose::Refresh)
    );
}

#[tokio::test]
async fn test_refresh_fails_after_refresh_expiry() {
    let app = TestApp::new();
    app.create_user("ivan", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("ivan", "pw"))
        .await
        .unwrap();

    app.clock.advance(REFRESH_EXPIRY);
    let result = AuthService::refresh(&app.state, Some(&outcome.refresh_token)).await;
    assert!(matches!(result, Err(AuthError::InvalidToken)));
}

#[tokio::test]
async fn test_refresh_for_deleted_user_is_not_found() {
    let app = TestApp::new();
    let user = app.create_user("judy", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("judy", "pw"))
        .await
        .unwrap();

    app.state.store.delete_by_id(user.id).await.unwrap();

    let result = AuthService::refresh(&app.state, Some(&outcome.refresh_token)).await;
    assert!(matches!(result, Err(AuthError::UserNotFound)));
}

#[tokio::test]
async fn test_refreshed_token_carries_current_role() {
    let app = TestApp::new();
    let mut user = app.create_user("ken", "pw", Role::User).await;
    let outcome = AuthService::login(&app.state, login_request("ken", "pw"))
        .await
        .unwrap();

    user.role = Role::Admin;
    app.state.store.save(user).await.unwrap();

    let refreshed = AuthService::refresh(&app.state, Some(&outcome.refresh_token))
        .await
        .unwrap();
    assert_eq!(
        app.state.tokens.extract_role(&refreshed.access_token).unwrap(),
        Role::Admin
    );
}

#[test]
fn test_assignable_role_defaults_to_user() {
    let anonymous = AuthenticatedContext::anonymous();
    assert_eq!(AuthService::assignable_role(&anonymous, None).unwrap(), Role::User);
    assert_eq!(
        AuthService::assignable_role(&anonymous, Some(Role::User)).unwrap(),
        Role::User
    );
}

#[test]
fn test_validate_missing_token_is_false() {
    let app = TestApp::new();
    assert!(!AuthService::validate_token(&app.state, None));
    assert!(!AuthService::validate_token(&app.state, Some("not-a-token")));
}
