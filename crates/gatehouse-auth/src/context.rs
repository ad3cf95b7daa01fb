//! Per-request authentication state.

use gatehouse_models::{Principal, Role};

/// Who is making the current request.
///
/// Created once per request by the authentication middleware and passed
/// explicitly to whatever needs it. Never shared between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthenticatedContext {
    #[default]
    Anonymous,
    Authenticated(Principal),
}

impl AuthenticatedContext {
    pub fn anonymous() -> Self {
        AuthenticatedContext::Anonymous
    }

    pub fn authenticated(principal: Principal) -> Self {
        AuthenticatedContext::Authenticated(principal)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthenticatedContext::Authenticated(_))
    }

    pub fn principal(&self) -> Option<&Principal> {
        match self {
            AuthenticatedContext::Authenticated(principal) => Some(principal),
            AuthenticatedContext::Anonymous => None,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.principal().map(|p| p.role)
    }

    pub fn username(&self) -> Option<&str> {
        self.principal().map(|p| p.username.as_str())
    }

    /// The granted authority set. Holds a single entry when authenticated.
    pub fn authorities(&self) -> Vec<&'static str> {
        self.role().map(|role| vec![role.authority()]).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        let ctx = AuthenticatedContext::default();
        assert!(!ctx.is_authenticated());
        assert!(ctx.principal().is_none());
        assert!(ctx.authorities().is_empty());
    }

    #[test]
    fn test_authenticated_accessors() {
        let ctx = AuthenticatedContext::authenticated(Principal::bare("alice", Role::Admin));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.username(), Some("alice"));
        assert_eq!(ctx.role(), Some(Role::Admin));
        assert_eq!(ctx.authorities(), vec!["ROLE_ADMIN"]);
    }
}
