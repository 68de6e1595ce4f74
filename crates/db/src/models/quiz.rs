//! Quiz category and question models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// A quiz category row from the `quiz_categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizCategory {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a quiz category.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizCategory {
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a quiz category.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuizCategory {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// A quiz question row from the `quiz_questions` table.
///
/// `correct_answer` is one of `A`/`B`/`C`/`D`, enforced by a check constraint.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuizQuestion {
    pub id: DbId,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub character_id: Option<DbId>,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a quiz question.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateQuizQuestion {
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
    pub character_id: Option<DbId>,
    pub category_id: Option<DbId>,
}

/// DTO for updating a quiz question. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateQuizQuestion {
    pub question: Option<String>,
    pub option_a: Option<String>,
    pub option_b: Option<String>,
    pub option_c: Option<String>,
    pub option_d: Option<String>,
    pub correct_answer: Option<String>,
    pub character_id: Option<DbId>,
    pub category_id: Option<DbId>,
}
