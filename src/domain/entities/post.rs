//! Post entity and its write inputs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::utils::image_url::derive_image_url;

/// A blog post.
///
/// `image_url` is never stored; it is derived from `image_key` and the
/// configured uploads base URL when the post leaves the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub image_key: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Creates a new Post instance without a derived image URL.
    pub fn new(
        id: i64,
        title: String,
        content: String,
        author: String,
        image_key: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            author,
            image_key,
            image_url: None,
            created_at,
        }
    }

    /// Fills `image_url` from `image_key` when it is not already present.
    ///
    /// Leaves `image_url` as `None` when there is no key or no base URL.
    pub fn with_image_url(mut self, base_url: Option<&str>) -> Self {
        if self.image_url.is_none()
            && let (Some(base), Some(key)) = (base_url, self.image_key.as_deref())
        {
            self.image_url = Some(derive_image_url(base, key));
        }
        self
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be empty".into()));
    }
    Ok(())
}

/// Input for creating a post.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewPost {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
    pub image_key: Option<String>,
}

impl NewPost {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
        image_key: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            image_key: image_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Replacement values for an existing post. Only these fields are mutable.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PostChanges {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub content: String,
    #[validate(custom(function = "not_blank"))]
    pub author: String,
}

impl PostChanges {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
        }
    }
}
