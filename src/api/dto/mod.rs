//! Request and response DTOs for the public API.

pub mod analytics;
pub mod auth;
pub mod health;
pub mod links;
pub mod shorten;
