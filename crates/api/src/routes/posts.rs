use axum::routing::get;
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
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
        .route("/", get(posts::list).post(posts::create))
        .route("/slug/{slug}", get(posts::get_by_slug))
        .route(
            "/{id}",
            get(posts::get_by_id).put(posts::update).delete(posts::delete),
        )
}
