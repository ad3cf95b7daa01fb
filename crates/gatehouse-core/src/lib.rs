//! # Gatehouse Core
//!
//! Core types shared by every Gatehouse crate.
//!
//! - [`errors`]: the HTTP-facing [`AppError`] and its JSON body
//! - [`password`]: bcrypt hashing and the one-way verify primitive
//!
//! # Example
//!
//! ```ignore
//! use gatehouse_core::{AppError, hash_password_with_cost, verify_password};
//!
//! let hash = hash_password_with_cost("secure_password", 12)?;
//! assert!(verify_password("secure_password", &hash)?);
//!
//! let error = AppError::forbidden("ACCESS_DENIED", "Access denied");
//! ```

pub mod errors;
pub mod password;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorResponse};
pub use password::{hash_password_with_cost, verify_password};
