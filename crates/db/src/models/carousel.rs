//! Homepage carousel slide model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// A slide row from the `carousel_slides` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CarouselSlide {
    pub id: DbId,
    /// Rich-text (HTML) quote displayed on the slide.
    pub quote: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a slide.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCarouselSlide {
    pub quote: String,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}

/// DTO for updating a slide. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCarouselSlide {
    pub quote: Option<String>,
    pub author: Option<String>,
    pub image_url: Option<String>,
    pub sort_order: Option<i32>,
    pub is_active: Option<bool>,
}
