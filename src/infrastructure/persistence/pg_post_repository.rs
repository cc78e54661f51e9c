//! PostgreSQL implementation of post repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewPost, Post, PostChanges};
use crate::domain::repositories::PostRepository;
use crate::error::AppError;

/// Row shape of the `posts` table.
#[derive(Debug, FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
    author: String,
    image_key: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(r: PostRow) -> Self {
        Post::new(r.id, r.title, r.content, r.author, r.image_key, r.created_at)
    }
}

/// PostgreSQL repository for post storage.
///
/// All statements are parameterized; nothing is interpolated into SQL.
pub struct PgPostRepository {
    pool: Arc<PgPool>,
}

impl PgPostRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Number of stored posts.
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn list(&self) -> Result<Vec<Post>, AppError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, image_key, created_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content, author, image_key, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn create(&self, new_post: NewPost) -> Result<Post, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            INSERT INTO posts (title, content, author, image_key)
            VALUES ($1, $2, $3, $4)
            RETURNING id, title, content, author, image_key, created_at
            "#,
        )
        .bind(new_post.title)
        .bind(new_post.content)
        .bind(new_post.author)
        .bind(new_post.image_key)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i64, changes: PostChanges) -> Result<Option<Post>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            UPDATE posts
            SET title = $1, content = $2, author = $3
            WHERE id = $4
            RETURNING id, title, content, author, image_key, created_at
            "#,
        )
        .bind(changes.title)
        .bind(changes.content)
        .bind(changes.author)
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Post::from))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
