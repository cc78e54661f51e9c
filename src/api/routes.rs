//! API route configuration.

use crate::api::handlers::{
    create_post_handler, delete_post_handler, get_post_handler, list_posts_handler,
    update_post_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Posts CRUD routes.
///
/// # Endpoints
///
/// - `GET    /posts`        - List all posts, newest first
/// - `POST   /posts`        - Create a post
/// - `GET    /posts/{id}`   - Fetch a single post
/// - `PUT    /posts/{id}`   - Replace title, content and author
/// - `DELETE /posts/{id}`   - Delete a post
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", get(list_posts_handler).post(create_post_handler))
        .route(
            "/posts/{id}",
            get(get_post_handler)
                .put(update_post_handler)
                .delete(delete_post_handler),
        )
}
