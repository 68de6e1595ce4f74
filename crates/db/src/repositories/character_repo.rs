//! Repository for the `characters` table.

use sqlx::PgPool;
use vietsu_core::types::DbId;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, slug, timeline, summary, content, image_url, audio_url, created_at, updated_at";

/// Provides CRUD operations for historical characters.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character, returning the created row.
    ///
    /// `slug` is passed separately because the handler may have generated it
    /// from the name.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCharacter,
        slug: &str,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters (name, slug, timeline, summary, content, image_url, audio_url)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(&input.name)
            .bind(slug)
            .bind(&input.timeline)
            .bind(&input.summary)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.audio_url)
            .fetch_one(pool)
            .await
    }

    /// Find a character by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a character by its public slug.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE slug = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List all characters, alphabetically by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY name ASC");
        sqlx::query_as::<_, Character>(&query).fetch_all(pool).await
    }

    /// Case-insensitive substring search over name and summary, used by the
    /// chatbot fallback. Results come back alphabetically, capped by `limit`.
    pub async fn search(
        pool: &PgPool,
        term: &str,
        limit: i64,
    ) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters
             WHERE name ILIKE $1 OR summary ILIKE $1
             ORDER BY name ASC
             LIMIT $2"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(format!("%{term}%"))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                slug = COALESCE($3, slug),
                timeline = COALESCE($4, timeline),
                summary = COALESCE($5, summary),
                content = COALESCE($6, content),
                image_url = COALESCE($7, image_url),
                audio_url = COALESCE($8, audio_url)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.slug)
            .bind(&input.timeline)
            .bind(&input.summary)
            .bind(&input.content)
            .bind(&input.image_url)
            .bind(&input.audio_url)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
