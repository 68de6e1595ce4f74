pub mod admin;
pub mod carousel;
pub mod characters;
pub mod chatbot;
pub mod health;
pub mod orders;
pub mod payment;
pub mod posts;
pub mod products;
pub mod quiz;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                      list, create
/// /characters/{id}                 get, update, delete
/// /characters/slug/{slug}          get by slug
///
/// /posts                           list, create
/// /posts/{id}                      get, update, delete
/// /posts/slug/{slug}               get by slug
///
/// /products                        list, create
/// /products/{id}                   get, update, delete
/// /products/slug/{slug}            get by slug
///
/// /quiz/categories                 list, create
/// /quiz/categories/{id}            update, delete
/// /quiz/questions                  list (?category_id, ?character_id), create
/// /quiz/questions/{id}             get, update, delete
///
/// /carousel                        list (?active_only), create
/// /carousel/{id}                   update, delete
///
/// /admin/register                  register admin
/// /admin/login                     login, returns bearer token
/// /admin                           list admins (auth)
/// /admin/{id}                      delete admin (auth, not self)
/// /admin/forgot-password           request reset link
/// /admin/reset-password            redeem reset token
///
/// /orders                          checkout (POST), list (GET, auth)
/// /orders/{code}                   public lookup by order code
/// /orders/{code}/status            update status (auth)
///
/// /payment/vnpay/create-url        build signed redirect URL
/// /payment/vnpay/return            browser return callback
/// /payment/vnpay/ipn               server-to-server callback
///
/// /chatbot                         ask a question
///
/// /uploads                         multipart media upload (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health is reachable both at the root and under /api.
        .merge(health::router())
        // Content resources.
        .nest("/characters", characters::router())
        .nest("/posts", posts::router())
        .nest("/products", products::router())
        .nest("/quiz", quiz::router())
        .nest("/carousel", carousel::router())
        // Admin accounts and password reset.
        .nest("/admin", admin::router())
        // Checkout and order management.
        .nest("/orders", orders::router())
        // VNPay gateway flow.
        .nest("/payment", payment::router())
        // AI assistant with database fallback.
        .nest("/chatbot", chatbot::router())
        // Media uploads.
        .nest("/uploads", uploads::router())
}
