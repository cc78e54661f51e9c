#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use simple_blog::application::services::PostService;
use simple_blog::domain::entities::{NewPost, Post, PostChanges};
use simple_blog::domain::repositories::PostRepository;
use simple_blog::error::AppError;
use simple_blog::infrastructure::cache::{
    CacheError, CacheHandle, CacheOptions, CacheResult, CacheService,
};
use simple_blog::state::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const IMAGE_BASE: &str = "https://cdn.example.com";

/// In-process stand-in for the `posts` table.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Mutex<Vec<Post>>,
    next_id: AtomicI64,
    failing: AtomicBool,
    list_calls: AtomicUsize,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Makes every subsequent call fail like a lost database connection.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::database("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        let mut posts = self.posts.lock().unwrap().clone();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        self.check()?;
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        self.check()?;
        let post = Post::new(
            self.next_id.fetch_add(1, Ordering::SeqCst),
            new_post.title,
            new_post.content,
            new_post.author,
            new_post.image_key,
            Utc::now(),
        );
        self.posts.lock().unwrap().push(post.clone());
        Ok(post)
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.title = changes.title;
        post.content = changes.content;
        post.author = changes.author;
        Ok(Some(post.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.check()?;
        let mut posts = self.posts.lock().unwrap();
        let before = posts.len();
        posts.retain(|p| p.id != id);
        Ok(posts.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// In-process key-value cache that can be switched into a failing mode.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, u64)>>,
    failing: AtomicBool,
    pub calls: AtomicUsize,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    /// Writes an entry directly, bypassing the handle.
    pub fn seed(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), 60));
    }

    fn check(&self) -> CacheResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError(
                "connection reset by peer".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.check()?;
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone()))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.check()?;
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn delete(&self, key: &str) -> CacheResult<()> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn ping(&self) -> CacheResult<()> {
        self.check()
    }
}

/// Test fixture: service wired to in-memory store and cache.
pub struct Fixture {
    pub repository: Arc<InMemoryPostRepository>,
    pub cache: Arc<MemoryCache>,
    pub handle: Arc<CacheHandle>,
    pub service: Arc<PostService>,
}

impl Fixture {
    /// Store plus a healthy in-memory cache.
    pub fn with_cache() -> Self {
        let cache = Arc::new(MemoryCache::new());
        let backend: Arc<dyn CacheService> = cache.clone();
        let handle = Arc::new(CacheHandle::new(backend, CacheOptions::default()));
        Self::build(cache, handle)
    }

    /// Store with no cache configured.
    pub fn without_cache() -> Self {
        Self::build(
            Arc::new(MemoryCache::new()),
            Arc::new(CacheHandle::disabled()),
        )
    }

    /// Store plus an arbitrary cache handle.
    pub fn with_handle(handle: CacheHandle) -> Self {
        Self::build(Arc::new(MemoryCache::new()), Arc::new(handle))
    }

    fn build(cache: Arc<MemoryCache>, handle: Arc<CacheHandle>) -> Self {
        let repository = Arc::new(InMemoryPostRepository::new());
        let service = Arc::new(PostService::new(
            repository.clone(),
            handle.clone(),
            Some(IMAGE_BASE.to_string()),
        ));

        Self {
            repository,
            cache,
            handle,
            service,
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.service.clone())
    }
}
