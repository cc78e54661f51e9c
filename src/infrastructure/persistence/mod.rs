//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx
//! parameterized queries.
//!
//! # Repositories
//!
//! - [`PgPostRepository`] - Post storage and retrieval

pub mod pg_post_repository;

pub use pg_post_repository::PgPostRepository;
