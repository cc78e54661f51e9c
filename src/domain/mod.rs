//! Domain layer: the post entity and the durable store contract.
//!
//! - [`entities`] - Post data structures and write inputs
//! - [`repositories`] - Data access trait implemented by the infrastructure layer
//!
//! The domain layer has no dependency on the cache or the HTTP layer.

pub mod entities;
pub mod repositories;
