//! Repository trait definitions for the domain layer.
//!
//! Implementations live in `crate::infrastructure::persistence`; mock
//! implementations are generated via `mockall` for unit tests.

pub mod post_repository;

pub use post_repository::PostRepository;

#[cfg(test)]
pub use post_repository::MockPostRepository;
