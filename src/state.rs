//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::PostService;
use crate::infrastructure::cache::CacheHandle;

#[derive(Clone)]
pub struct AppState {
    pub post_service: Arc<PostService>,
    pub cache: Arc<CacheHandle>,
}

impl AppState {
    pub fn new(post_service: Arc<PostService>) -> Self {
        let cache = post_service.cache().clone();
        Self {
            post_service,
            cache,
        }
    }
}
