use axum::routing::{get, put};
use axum::Router;

use crate::handlers::carousel;
use crate::state::AppState;

/// Routes mounted at `/carousel`.
///
/// ```text
/// GET    /      -> list (?active_only)
/// POST   /      -> create (admin)
/// PUT    /{id}  -> update (admin)
/// DELETE /{id}  -> delete (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(carousel::list).post(carousel::create))
        .route("/{id}", put(carousel::update).delete(carousel::delete))
}
