//! Data Transfer Objects for API requests and responses.
//!
//! Post responses serialize [`crate::domain::entities::Post`] directly.

pub mod health;
pub mod post;
