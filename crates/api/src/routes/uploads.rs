use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /  -> upload (admin, multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::upload))
        // Multipart framing overhead on top of the per-file cap.
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 64 * 1024))
}
