//! Handlers for the `/characters` resource.
//!
//! Public pages read characters by slug or id; create/update/delete require
//! an authenticated admin.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vietsu_core::error::CoreError;
use vietsu_core::slug::{generate_slug, validate_slug};
use vietsu_core::types::DbId;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::character::{CreateCharacter, UpdateCharacter};
use vietsu_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /characters
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let characters = CharacterRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: characters }))
}

/// GET /characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Character",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: character }))
}

/// GET /characters/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let character = CharacterRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Character",
                key: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: character }))
}

/// POST /characters (admin)
///
/// Generates the slug from the name when not supplied.
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCharacter>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "name").map_err(AppError::Core)?;

    let slug = match &input.slug {
        Some(s) => {
            validate_slug(s).map_err(AppError::Core)?;
            s.clone()
        }
        None => generate_slug(&input.name),
    };

    let character = CharacterRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        admin_id = admin.admin_id,
        character_id = character.id,
        slug = %character.slug,
        "Character created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// PUT /characters/{id} (admin)
pub async fn update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }

    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Character",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: character }))
}

/// DELETE /characters/{id} (admin)
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CharacterRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Character",
            key: id.to_string(),
        }));
    }

    tracing::info!(admin_id = admin.admin_id, character_id = id, "Character deleted");
    Ok(StatusCode::NO_CONTENT)
}
