use axum::routing::{get, put};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// POST   /               -> checkout
/// GET    /               -> list (auth)
/// GET    /{code}         -> get_by_code (public; the code is the capability)
/// PUT    /{code}/status  -> update_status (auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::checkout))
        .route("/{code}", get(orders::get_by_code))
        .route("/{code}/status", put(orders::update_status))
}
