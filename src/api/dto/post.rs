//! DTOs for the posts endpoints.

use serde::Deserialize;

use crate::domain::entities::{NewPost, PostChanges};

/// Request body for `POST /posts`.
///
/// Text fields are optional at the JSON level: a missing or `null` field
/// becomes an empty string and is then rejected by validation with a 400.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,

    /// Storage key of an uploaded image.
    #[serde(default)]
    pub image_key: Option<String>,

    /// Same as `image_key`, sent by the browser frontend. Used only when
    /// `image_key` is absent or blank.
    #[serde(default, rename = "imageKey")]
    pub image_key_camel: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        let image_key = non_blank(req.image_key).or_else(|| non_blank(req.image_key_camel));
        NewPost::new(
            req.title.unwrap_or_default(),
            req.content.unwrap_or_default(),
            req.author.unwrap_or_default(),
            image_key,
        )
    }
}

/// Request body for `PUT /posts/{id}`.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

impl From<UpdatePostRequest> for PostChanges {
    fn from(req: UpdatePostRequest) -> Self {
        PostChanges::new(
            req.title.unwrap_or_default(),
            req.content.unwrap_or_default(),
            req.author.unwrap_or_default(),
        )
    }
}
