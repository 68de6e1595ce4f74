//! Repository for the `quiz_categories` and `quiz_questions` tables.

use sqlx::PgPool;
use vietsu_core::types::DbId;

use crate::models::quiz::{
    CreateQuizCategory, CreateQuizQuestion, QuizCategory, QuizQuestion, UpdateQuizCategory,
    UpdateQuizQuestion,
};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

const QUESTION_COLUMNS: &str = "id, question, option_a, option_b, option_c, option_d, \
    correct_answer, character_id, category_id, created_at, updated_at";

/// Provides CRUD operations for quiz categories and questions.
pub struct QuizRepo;

impl QuizRepo {
    // -- Categories ---------------------------------------------------------

    /// Insert a new category.
    pub async fn create_category(
        pool: &PgPool,
        input: &CreateQuizCategory,
    ) -> Result<QuizCategory, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_categories (name, description)
             VALUES ($1, $2)
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, QuizCategory>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID.
    pub async fn find_category(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuizCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM quiz_categories WHERE id = $1");
        sqlx::query_as::<_, QuizCategory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all categories alphabetically.
    pub async fn list_categories(pool: &PgPool) -> Result<Vec<QuizCategory>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM quiz_categories ORDER BY name ASC");
        sqlx::query_as::<_, QuizCategory>(&query)
            .fetch_all(pool)
            .await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    pub async fn update_category(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuizCategory,
    ) -> Result<Option<QuizCategory>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_categories SET
                name = COALESCE($2, name),
                description = COALESCE($3, description)
             WHERE id = $1
             RETURNING {CATEGORY_COLUMNS}"
        );
        sqlx::query_as::<_, QuizCategory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category. Questions keep existing with `category_id` NULL.
    pub async fn delete_category(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -- Questions ----------------------------------------------------------

    /// Insert a new question.
    pub async fn create_question(
        pool: &PgPool,
        input: &CreateQuizQuestion,
    ) -> Result<QuizQuestion, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions
                (question, option_a, option_b, option_c, option_d, correct_answer,
                 character_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(&input.question)
            .bind(&input.option_a)
            .bind(&input.option_b)
            .bind(&input.option_c)
            .bind(&input.option_d)
            .bind(&input.correct_answer)
            .bind(input.character_id)
            .bind(input.category_id)
            .fetch_one(pool)
            .await
    }

    /// Find a question by ID.
    pub async fn find_question(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!("SELECT {QUESTION_COLUMNS} FROM quiz_questions WHERE id = $1");
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List questions, optionally filtered by category and/or character.
    pub async fn list_questions(
        pool: &PgPool,
        category_id: Option<DbId>,
        character_id: Option<DbId>,
    ) -> Result<Vec<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "SELECT {QUESTION_COLUMNS} FROM quiz_questions
             WHERE ($1::BIGINT IS NULL OR category_id = $1)
               AND ($2::BIGINT IS NULL OR character_id = $2)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(category_id)
            .bind(character_id)
            .fetch_all(pool)
            .await
    }

    /// Update a question. Only non-`None` fields in `input` are applied.
    pub async fn update_question(
        pool: &PgPool,
        id: DbId,
        input: &UpdateQuizQuestion,
    ) -> Result<Option<QuizQuestion>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_questions SET
                question = COALESCE($2, question),
                option_a = COALESCE($3, option_a),
                option_b = COALESCE($4, option_b),
                option_c = COALESCE($5, option_c),
                option_d = COALESCE($6, option_d),
                correct_answer = COALESCE($7, correct_answer),
                character_id = COALESCE($8, character_id),
                category_id = COALESCE($9, category_id)
             WHERE id = $1
             RETURNING {QUESTION_COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestion>(&query)
            .bind(id)
            .bind(&input.question)
            .bind(&input.option_a)
            .bind(&input.option_b)
            .bind(&input.option_c)
            .bind(&input.option_d)
            .bind(&input.correct_answer)
            .bind(input.character_id)
            .bind(input.category_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a question. Returns `true` if a row was removed.
    pub async fn delete_question(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
