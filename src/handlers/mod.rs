pub mod admin;
pub mod auth;
pub mod comment;
pub mod report;

pub use auth::*;
