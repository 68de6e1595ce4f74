//! Handlers for the `/carousel` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vietsu_core::error::CoreError;
use vietsu_core::types::DbId;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::carousel::{CreateCarouselSlide, UpdateCarouselSlide};
use vietsu_db::repositories::CarouselSlideRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Query params for slide listing.
#[derive(Debug, Deserialize)]
pub struct ListSlidesParams {
    /// When true (the public default), only active slides are returned.
    pub active_only: Option<bool>,
}

/// GET /carousel?active_only=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListSlidesParams>,
) -> AppResult<impl IntoResponse> {
    let slides =
        CarouselSlideRepo::list(&state.pool, params.active_only.unwrap_or(true)).await?;
    Ok(Json(DataResponse { data: slides }))
}

/// POST /carousel (admin)
pub async fn create(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateCarouselSlide>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.quote, "quote").map_err(AppError::Core)?;
    let slide = CarouselSlideRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// PUT /carousel/{id} (admin)
pub async fn update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCarouselSlide>,
) -> AppResult<impl IntoResponse> {
    let slide = CarouselSlideRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "CarouselSlide",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: slide }))
}

/// DELETE /carousel/{id} (admin)
pub async fn delete(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = CarouselSlideRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "CarouselSlide",
            key: id.to_string(),
        }));
    }
    Ok(StatusCode::NO_CONTENT)
}
