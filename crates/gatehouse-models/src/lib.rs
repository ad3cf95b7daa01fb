//! # Gatehouse Models
//!
//! Domain models shared across the Gatehouse crates:
//!
//! - [`roles`]: the closed [`Role`] set and its privilege ordering
//! - [`users`]: stored [`User`] records, the request [`Principal`], response DTOs
//! - [`store`]: the [`UserStore`] contract consumed by authentication

pub mod roles;
pub mod store;
pub mod users;

pub use roles::{ParseRoleError, Role};
pub use store::{StoreError, UserStore};
pub use users::{Principal, User, UserResponse};
