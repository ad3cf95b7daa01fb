//! # Gatehouse Auth
//!
//! Token lifecycle and authorization primitives for the Gatehouse API.
//!
//! - [`claims`]: the signed payload ([`Claims`]) and its [`TokenPurpose`]
//! - [`codec`]: HS256 encoding/decoding of claims ([`ClaimsCodec`])
//! - [`clock`]: time source used for issuance and expiry
//! - [`tokens`]: issuance, validation and claim extraction ([`TokenService`])
//! - [`credentials`]: username/password verification ([`CredentialAuthenticator`])
//! - [`context`]: the per-request [`AuthenticatedContext`]
//! - [`guard`]: role-set checks ([`allow`], [`require`])
//! - [`error`]: the [`AuthError`] taxonomy
//!
//! # Token Types
//!
//! - **Access Token**: short-lived (default 24 hours), authorizes requests
//! - **Refresh Token**: long-lived (default 7 days), authorizes minting a new access token
//!
//! Both carry the subject's username and role. There is no server-side
//! revocation: a token stays valid until it expires or the signing key
//! changes.
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_auth::{AuthenticatedContext, TokenPurpose, TokenService, guard};
//!
//! let tokens = TokenService::new(&jwt_config);
//! let token = tokens.issue(&principal, TokenPurpose::Access)?;
//!
//! if tokens.validate_for(&token, TokenPurpose::Access) {
//!     let context = AuthenticatedContext::authenticated(principal);
//!     assert!(guard::allow(&context, guard::USER_ROLES));
//! }
//! ```

pub mod claims;
pub mod clock;
pub mod codec;
pub mod context;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod tokens;

// Re-export commonly used types at crate root
pub use claims::{Claims, TokenPurpose};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::ClaimsCodec;
pub use context::AuthenticatedContext;
pub use credentials::CredentialAuthenticator;
pub use error::AuthError;
pub use guard::{allow, require};
pub use tokens::TokenService;
