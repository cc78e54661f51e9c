//! Core domain entities.
//!
//! - [`Post`] - A stored blog post
//! - [`NewPost`] - Validated input for creating a post
//! - [`PostChanges`] - Validated replacement values for an update

pub mod post;

pub use post::{NewPost, Post, PostChanges};
