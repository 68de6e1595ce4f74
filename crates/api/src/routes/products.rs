use axum::routing::get;
use axum::Router;

use crate::handlers::products;
use crate::state::AppState;

/// Routes mounted at `/products`.
///
/// ```text
/// GET    /             -> list
/// POST   /             -> create (admin)
/// GET    /{id}         -> get_by_id
/// PUT    /{id}         -> update (admin)
/// DELETE /{id}         -> delete (admin)
/// GET    /slug/{slug}  -> get_by_slug
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(products::list).post(products::create))
        .route("/slug/{slug}", get(products::get_by_slug))
        .route(
            "/{id}",
            get(products::get_by_id)
                .put(products::update)
                .delete(products::delete),
        )
}
