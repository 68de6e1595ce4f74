use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::admin;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /register         -> register
/// POST   /login            -> login
/// GET    /                 -> list (auth)
/// DELETE /{id}             -> delete (auth, not self)
/// POST   /forgot-password  -> forgot_password
/// POST   /reset-password   -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(admin::register))
        .route("/login", post(admin::login))
        .route("/", get(admin::list))
        .route("/{id}", delete(admin::delete))
        .route("/forgot-password", post(admin::forgot_password))
        .route("/reset-password", post(admin::reset_password))
}
