//! Application services orchestrating domain logic over the repositories.

mod analytics_service;
mod auth_service;
mod link_service;
mod resolver_service;

pub use analytics_service::{AnalyticsService, Growth, Trend};
pub use auth_service::AuthService;
pub use link_service::{CreateLink, LinkService};
pub use resolver_service::{Resolution, ResolverService};
