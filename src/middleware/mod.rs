//! Middleware for request authentication and authorization.
//!
//! # Request flow
//!
//! 1. The [`auth::AuthUser`] extractor reads the session cookie, verifies the
//!    token, and re-fetches the credential row (a deleted user is cut off
//!    immediately, valid token or not).
//! 2. Route groups attach [`role::require_student`] or [`role::require_staff`]
//!    via `middleware::from_fn_with_state`; the generic [`role::require_roles`]
//!    guard re-resolves the caller's effective role from the store and checks
//!    it against the route's allowed set.
//! 3. Handlers take `AuthUser` as an argument for the caller's identity.

pub mod auth;
pub mod role;
