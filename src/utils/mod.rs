//! Shared utilities.
//!
//! - [`cookies`]: token cookie construction, removal and extraction

pub mod cookies;
