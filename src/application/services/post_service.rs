//! Cached post store: read-through cache over the durable post repository.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::domain::entities::{NewPost, Post, PostChanges};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;
use crate::infrastructure::cache::CacheHandle;

/// Cache key holding the serialized, newest-first list of all posts.
pub const POSTS_CACHE_KEY: &str = "posts:all";

/// Default lifetime of the cached posts snapshot.
pub const DEFAULT_CACHE_TTL_SECONDS: u64 = 60;

/// Read/write access to posts, fronted by a fail-open cache.
///
/// Reads check the `posts:all` snapshot first and fall back to the repository
/// on a miss, repopulating the snapshot. Writes go to the repository and then
/// delete the snapshot. Cache failures never fail an operation; they disable
/// the cache through the shared [`CacheHandle`].
pub struct PostService {
    repository: Arc<dyn PostRepository>,
    cache: Arc<CacheHandle>,
    image_base_url: Option<String>,
    cache_ttl_seconds: u64,
}

impl PostService {
    /// Creates a new post service.
    pub fn new(
        repository: Arc<dyn PostRepository>,
        cache: Arc<CacheHandle>,
        image_base_url: Option<String>,
    ) -> Self {
        Self {
            repository,
            cache,
            image_base_url,
            cache_ttl_seconds: DEFAULT_CACHE_TTL_SECONDS,
        }
    }

    /// Overrides the snapshot TTL.
    pub fn with_cache_ttl(mut self, ttl_seconds: u64) -> Self {
        self.cache_ttl_seconds = ttl_seconds;
        self
    }

    /// The cache handle shared with this service.
    pub fn cache(&self) -> &Arc<CacheHandle> {
        &self.cache
    }

    /// Lists all posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Database`] if the repository fails on a cache miss.
    /// Cache errors are never returned.
    pub async fn list_posts(&self) -> Result<Vec<Post>, AppError> {
        if let Some(cached) = self.cache.get(POSTS_CACHE_KEY).await {
            match serde_json::from_str::<Vec<Post>>(&cached) {
                Ok(posts) => {
                    metrics::counter!("blog_posts_cache_hits_total").increment(1);
                    debug!(count = posts.len(), "Serving posts from cache");
                    return Ok(posts);
                }
                Err(e) => {
                    warn!(error = %e, "Discarding unreadable posts snapshot");
                }
            }
        }
        metrics::counter!("blog_posts_cache_misses_total").increment(1);

        let posts: Vec<Post> = self
            .repository
            .list()
            .await?
            .into_iter()
            .map(|p| self.with_image_url(p))
            .collect();

        match serde_json::to_string(&posts) {
            Ok(body) => {
                self.cache
                    .set(POSTS_CACHE_KEY, &body, self.cache_ttl_seconds)
                    .await;
            }
            Err(e) => warn!(error = %e, "Failed to serialize posts snapshot"),
        }

        Ok(posts)
    }

    /// Fetches a single post from the durable store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn get_post(&self, id: i64) -> Result<Post, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|p| self.with_image_url(p))
            .ok_or_else(|| post_not_found(id))
    }

    /// Creates a post and invalidates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if title, content or author is blank;
    /// nothing is written in that case.
    pub async fn create_post(&self, new_post: NewPost) -> Result<Post, AppError> {
        new_post.validate()?;

        let post = self.repository.create(new_post).await?;
        info!(post_id = post.id, "Post created");

        self.invalidate().await;
        Ok(self.with_image_url(post))
    }

    /// Replaces title, content and author of a post and invalidates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for blank fields and
    /// [`AppError::NotFound`] if no post has this id.
    pub async fn update_post(&self, id: i64, changes: PostChanges) -> Result<Post, AppError> {
        changes.validate()?;

        let post = self
            .repository
            .update(id, changes)
            .await?
            .ok_or_else(|| post_not_found(id))?;
        info!(post_id = id, "Post updated");

        self.invalidate().await;
        Ok(self.with_image_url(post))
    }

    /// Deletes a post and invalidates the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no post has this id.
    pub async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        if !self.repository.delete(id).await? {
            return Err(post_not_found(id));
        }
        info!(post_id = id, "Post deleted");

        self.invalidate().await;
        Ok(())
    }

    /// Liveness of the durable store.
    pub async fn check_store(&self) -> Result<(), AppError> {
        self.repository.ping().await
    }

    async fn invalidate(&self) {
        if self.cache.invalidate(POSTS_CACHE_KEY).await {
            debug!("Cache invalidated for {}", POSTS_CACHE_KEY);
        }
    }

    fn with_image_url(&self, post: Post) -> Post {
        post.with_image_url(self.image_base_url.as_deref())
    }
}

fn post_not_found(id: i64) -> AppError {
    AppError::not_found("Post not found", json!({ "id": id }))
}
