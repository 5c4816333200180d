//! Repository traits abstracting the durable store.

mod click_repository;
mod link_repository;
mod user_repository;

pub use click_repository::{ClickRepository, DailyCount};
pub use link_repository::LinkRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use click_repository::MockClickRepository;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
