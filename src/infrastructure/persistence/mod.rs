//! Storage implementations of the domain repository traits.

mod memory;
mod pg_click_repository;
mod pg_link_repository;
mod pg_user_repository;
mod rows;

pub use memory::MemoryStore;
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
