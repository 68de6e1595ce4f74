use axum::routing::get;
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quiz`.
///
/// ```text
/// GET    /categories        -> list_categories
/// POST   /categories        -> create_category (admin)
/// PUT    /categories/{id}   -> update_category (admin)
/// DELETE /categories/{id}   -> delete_category (admin)
///
/// GET    /questions         -> list_questions (?category_id, ?character_id)
/// POST   /questions         -> create_question (admin)
/// GET    /questions/{id}    -> get_question
/// PUT    /questions/{id}    -> update_question (admin)
/// DELETE /questions/{id}    -> delete_question (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/categories",
            get(quiz::list_categories).post(quiz::create_category),
        )
        .route(
            "/categories/{id}",
            axum::routing::put(quiz::update_category).delete(quiz::delete_category),
        )
        .route(
            "/questions",
            get(quiz::list_questions).post(quiz::create_question),
        )
        .route(
            "/questions/{id}",
            get(quiz::get_question)
                .put(quiz::update_question)
                .delete(quiz::delete_question),
        )
}
