//! Handlers for the `/posts` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vietsu_core::error::CoreError;
use vietsu_core::slug::{generate_slug, validate_slug};
use vietsu_core::types::DbId;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::post::{CreatePost, UpdatePost};
use vietsu_db::repositories::PostRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /posts
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = PostRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: posts }))
}

/// GET /posts/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: post }))
}

/// GET /posts/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let post = PostRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                key: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: post }))
}

/// POST /posts (admin)
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreatePost>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.title, "title").map_err(AppError::Core)?;

    let slug = match &input.slug {
        Some(s) => {
            validate_slug(s).map_err(AppError::Core)?;
            s.clone()
        }
        None => generate_slug(&input.title),
    };

    let post = PostRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(admin_id = admin.admin_id, post_id = post.id, slug = %post.slug, "Post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

/// PUT /posts/{id} (admin)
pub async fn update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePost>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }

    let post = PostRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Post",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: post }))
}

/// DELETE /posts/{id} (admin)
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = PostRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Post",
            key: id.to_string(),
        }));
    }

    tracing::info!(admin_id = admin.admin_id, post_id = id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
