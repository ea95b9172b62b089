//! Storage backends.

mod memory;
mod pg_click_repository;
mod pg_link_repository;

pub use memory::MemoryBackend;
pub use pg_click_repository::PgClickRepository;
pub use pg_link_repository::PgLinkRepository;
