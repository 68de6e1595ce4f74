use axum::routing::get;
use axum::Router;

use crate::handlers::characters;
use crate::state::AppState;

/// Routes mounted at `/characters`.
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
        .route("/", get(characters::list).post(characters::create))
        .route("/slug/{slug}", get(characters::get_by_slug))
        .route(
            "/{id}",
            get(characters::get_by_id)
                .put(characters::update)
                .delete(characters::delete),
        )
}
