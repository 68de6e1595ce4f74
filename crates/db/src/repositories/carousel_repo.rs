//! Repository for the `carousel_slides` table.

use sqlx::PgPool;
use vietsu_core::types::DbId;

use crate::models::carousel::{CarouselSlide, CreateCarouselSlide, UpdateCarouselSlide};

const COLUMNS: &str =
    "id, quote, author, image_url, sort_order, is_active, created_at, updated_at";

/// Provides CRUD operations for homepage carousel slides.
pub struct CarouselSlideRepo;

impl CarouselSlideRepo {
    /// Insert a new slide, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCarouselSlide,
    ) -> Result<CarouselSlide, sqlx::Error> {
        let query = format!(
            "INSERT INTO carousel_slides (quote, author, image_url, sort_order, is_active)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarouselSlide>(&query)
            .bind(&input.quote)
            .bind(&input.author)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a slide by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CarouselSlide>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM carousel_slides WHERE id = $1");
        sqlx::query_as::<_, CarouselSlide>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List slides in display order; `active_only` filters to visible ones.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<CarouselSlide>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM carousel_slides
             WHERE ($1 = FALSE OR is_active = TRUE)
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, CarouselSlide>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    /// Update a slide. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCarouselSlide,
    ) -> Result<Option<CarouselSlide>, sqlx::Error> {
        let query = format!(
            "UPDATE carousel_slides SET
                quote = COALESCE($2, quote),
                author = COALESCE($3, author),
                image_url = COALESCE($4, image_url),
                sort_order = COALESCE($5, sort_order),
                is_active = COALESCE($6, is_active)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CarouselSlide>(&query)
            .bind(id)
            .bind(&input.quote)
            .bind(&input.author)
            .bind(&input.image_url)
            .bind(input.sort_order)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Delete a slide. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM carousel_slides WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
