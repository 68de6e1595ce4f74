use axum::routing::post;
use axum::Router;

use crate::handlers::chatbot;
use crate::state::AppState;

/// Routes mounted at `/chatbot`.
///
/// ```text
/// POST /  -> ask
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(chatbot::ask))
}
