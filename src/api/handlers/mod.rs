//! HTTP request handlers.

mod analytics;
mod auth;
mod health;
mod me;
mod redirect;
mod shorten;

pub use analytics::analytics_handler;
pub use auth::{login_handler, register_handler};
pub use health::health_handler;
pub use me::{deactivate_handler, me_handler};
pub use redirect::redirect_handler;
pub use shorten::shorten_handler;
