//! Historical character entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    /// Free-text timeline of the figure's life ("938: Battle of Bạch Đằng...").
    pub timeline: Option<String>,
    /// Rich-text (HTML) summary shown on listing cards.
    pub summary: Option<String>,
    /// Rich-text (HTML) full biography.
    pub content: Option<String>,
    pub image_url: Option<String>,
    /// Optional narration audio, served from `/uploads`.
    pub audio_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new character. Slug is generated from the name when omitted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCharacter {
    pub name: String,
    pub slug: Option<String>,
    pub timeline: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}

/// DTO for updating an existing character. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCharacter {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub timeline: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub audio_url: Option<String>,
}
