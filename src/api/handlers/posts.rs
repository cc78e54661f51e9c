//! Handlers for the posts CRUD endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::post::{CreatePostRequest, UpdatePostRequest};
use crate::api::extract::ApiJson;
use crate::domain::entities::Post;
use crate::error::AppError;
use crate::state::AppState;

/// Lists all posts, newest first.
///
/// # Endpoint
///
/// `GET /posts`
///
/// Served from the `posts:all` cache snapshot when present; otherwise read from
/// PostgreSQL and cached for `CACHE_TTL_SECONDS`.
///
/// # Errors
///
/// Returns 500 if the database cannot be read. Cache failures are never visible.
pub async fn list_posts_handler(State(state): State<AppState>) -> Result<Json<Vec<Post>>, AppError> {
    let posts = state.post_service.list_posts().await?;
    Ok(Json(posts))
}

/// Returns a single post.
///
/// # Endpoint
///
/// `GET /posts/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the post does not exist.
pub async fn get_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<Post>, AppError> {
    let post = state.post_service.get_post(id).await?;
    Ok(Json(post))
}

/// Creates a post.
///
/// # Endpoint
///
/// `POST /posts`
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Hello",
///   "content": "First post",
///   "author": "me",
///   "image_key": "posts/1/cover.jpg"   // optional, `imageKey` used when this is absent or blank
/// }
/// ```
///
/// # Response
///
/// 201 Created with the stored post, including `id`, `created_at` and the
/// derived `image_url`.
///
/// # Errors
///
/// Returns 400 Bad Request if title, content or author is missing, `null` or
/// blank, or if the body is not valid JSON.
pub async fn create_post_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let post = state.post_service.create_post(payload.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// Replaces title, content and author of a post.
///
/// # Endpoint
///
/// `PUT /posts/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request for blank fields, 404 Not Found if the post does not exist.
pub async fn update_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<UpdatePostRequest>,
) -> Result<Json<Post>, AppError> {
    let post = state.post_service.update_post(id, payload.into()).await?;
    Ok(Json(post))
}

/// Deletes a post.
///
/// # Endpoint
///
/// `DELETE /posts/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the post does not exist.
pub async fn delete_post_handler(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.post_service.delete_post(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
