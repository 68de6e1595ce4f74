//! Blog post entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// A post row from the `posts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub slug: String,
    /// Rich-text (HTML) article body.
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new post. Slug is generated from the title when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePost {
    pub title: String,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}

/// DTO for updating an existing post. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePost {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}
