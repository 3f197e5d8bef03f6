pub mod auth;
pub mod staff;
pub mod students;
