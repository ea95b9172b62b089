//! Domain layer: entities, the resolvability rule, per-link locking, and
//! the storage interface traits.

pub mod entities;
pub mod locks;
pub mod repositories;
pub mod resolution;
