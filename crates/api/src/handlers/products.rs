//! Handlers for the `/products` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use vietsu_core::error::CoreError;
use vietsu_core::slug::{generate_slug, validate_slug};
use vietsu_core::types::DbId;
use vietsu_core::validation::require_non_empty;
use vietsu_db::models::product::{CreateProduct, UpdateProduct};
use vietsu_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /products
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let products = ProductRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: products }))
}

/// GET /products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// GET /products/slug/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<impl IntoResponse> {
    let product = ProductRepo::find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                key: slug.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// POST /products (admin)
pub async fn create(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateProduct>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.name, "name").map_err(AppError::Core)?;
    if input.price < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Price must not be negative".into(),
        )));
    }

    let slug = match &input.slug {
        Some(s) => {
            validate_slug(s).map_err(AppError::Core)?;
            s.clone()
        }
        None => generate_slug(&input.name),
    };

    let product = ProductRepo::create(&state.pool, &input, &slug).await?;

    tracing::info!(
        admin_id = admin.admin_id,
        product_id = product.id,
        slug = %product.slug,
        "Product created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: product })))
}

/// PUT /products/{id} (admin)
pub async fn update(
    _admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<impl IntoResponse> {
    if let Some(ref slug) = input.slug {
        validate_slug(slug).map_err(AppError::Core)?;
    }
    if let Some(price) = input.price {
        if price < 0 {
            return Err(AppError::Core(CoreError::Validation(
                "Price must not be negative".into(),
            )));
        }
    }

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Product",
                key: id.to_string(),
            })
        })?;
    Ok(Json(DataResponse { data: product }))
}

/// DELETE /products/{id} (admin)
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let removed = ProductRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Product",
            key: id.to_string(),
        }));
    }

    tracing::info!(admin_id = admin.admin_id, product_id = id, "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
