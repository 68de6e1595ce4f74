//! Handlers for the `/quiz` resource: categories and questions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vietsu_core::error::CoreError;
use vietsu_core::types::DbId;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::quiz::{
    CreateQuizCategory, CreateQuizQuestion, UpdateQuizCategory, UpdateQuizQuestion,
};
use vietsu_db::repositories::QuizRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for question listing.
#[derive(Debug, Deserialize)]
pub struct ListQuestionsParams {
    pub category_id: Option<DbId>,
    pub character_id: Option<DbId>,
}

/// Validate the correct-answer tag against the four enumerated letters.
fn validate_answer_tag(tag: &str) -> Result<(), CoreError> {
    match tag {
        "A" | "B" | "C" | "D" => Ok(()),
        other => Err(CoreError::Validation(format!(
            "'{other}' is not a valid answer tag (expected A, B, C, or D)"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// GET /quiz/categories
pub async fn list_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = QuizRepo::list_categories(&state.pool).await?;
    Ok(Json(DataResponse { data: categories }))
}

/// POST /quiz/categories (admin)
pub async fn create_category(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateQuizCategory>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "name").map_err(AppError::Core)?;
    let category = QuizRepo::create_category(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: category })))
}

/// PUT /quiz/categories/{id} (admin)
pub async fn update_category(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuizCategory>,
) -> AppResult<impl IntoResponse> {
    let category = QuizRepo::update_category(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "QuizCategory",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: category }))
}

/// DELETE /quiz/categories/{id} (admin)
pub async fn delete_category(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = QuizRepo::delete_category(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "QuizCategory",
            key: id.to_string(),
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Questions
// ---------------------------------------------------------------------------

/// GET /quiz/questions?category_id=&character_id=
pub async fn list_questions(
    State(state): State<AppState>,
    Query(params): Query<ListQuestionsParams>,
) -> AppResult<impl IntoResponse> {
    let questions =
        QuizRepo::list_questions(&state.pool, params.category_id, params.character_id).await?;
    Ok(Json(DataResponse { data: questions }))
}

/// GET /quiz/questions/{id}
pub async fn get_question(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let question = QuizRepo::find_question(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "QuizQuestion",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: question }))
}

/// POST /quiz/questions (admin)
pub async fn create_question(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateQuizQuestion>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.question, "question").map_err(AppError::Core)?;
    validate_answer_tag(&input.correct_answer).map_err(AppError::Core)?;

    let question = QuizRepo::create_question(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /quiz/questions/{id} (admin)
pub async fn update_question(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateQuizQuestion>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref tag) = input.correct_answer {
        validate_answer_tag(tag).map_err(AppError::Core)?;
    }

    let question = QuizRepo::update_question(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "QuizQuestion",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: question }))
}

/// DELETE /quiz/questions/{id} (admin)
pub async fn delete_question(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = QuizRepo::delete_question(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "QuizQuestion",
            key: id.to_string(),
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
