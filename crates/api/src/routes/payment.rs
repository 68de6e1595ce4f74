use axum::routing::{get, post};
use axum::Router;

use crate::handlers::payment;
use crate::state::AppState;

/// Routes mounted at `/payment`.
///
/// ```text
/// POST /vnpay/create-url  -> create_url
/// GET  /vnpay/return      -> vnpay_return (browser redirect channel)
/// GET  /vnpay/ipn         -> vnpay_ipn (server-to-server channel)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/vnpay/create-url", post(payment::create_url))
        .route("/vnpay/return", get(payment::vnpay_return))
        .route("/vnpay/ipn", get(payment::vnpay_ipn))
}
