//! HTTP request handlers for API endpoints.

pub mod health;
pub mod posts;

pub use health::health_handler;
pub use posts::{
    create_post_handler, delete_post_handler, get_post_handler, list_posts_handler,
    update_post_handler,
};
