//! Configuration modules for the odleave API.
//!
//! Each submodule owns one aspect of configuration, loaded from environment
//! variables with sensible development defaults.
//!
//! # Modules
//!
//! - [`app`]: Server environment and listen port
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: Session token signing configuration

pub mod app;
pub mod cors;
pub mod database;
pub mod jwt;
