//! Repository trait for post data access.

use crate::domain::entities::{NewPost, Post, PostChanges};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store for posts. This is the system of record.
///
/// Returned posts carry `image_key` only; `image_url` derivation happens in
/// [`crate::application::services::PostService`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgPostRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Lists every post, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] on connection or query failure.
    async fn list(&self) -> Result<Vec<Post>, AppError>;

    /// Finds a single post by id.
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    /// Inserts a post; the store assigns `id` and `created_at`.
    async fn create(&self, new_post: NewPost) -> Result<Post, AppError>;

    /// Replaces title, content and author of a post.
    ///
    /// Returns `Ok(None)` when no post has the given id.
    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError>;

    /// Deletes a post. Returns `Ok(false)` when no post has the given id.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Liveness probe against the store.
    async fn ping(&self) -> Result<(), AppError>;
}
