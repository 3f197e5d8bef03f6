//! Shared utilities.
//!
//! - [`cookies`]: Session cookie construction and clearing
//! - [`errors`]: Application error type and HTTP rendering
//! - [`jwt`]: Session token creation and verification
//! - [`password`]: Password hashing and verification

pub mod cookies;
pub mod errors;
pub mod jwt;
pub mod password;
