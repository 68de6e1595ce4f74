//! Shared helpers for HTTP-level integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use vietsu_api::auth::jwt::{generate_token, JwtConfig};
use vietsu_api::auth::password::hash_password;
use vietsu_api::config::{ServerConfig, VnpayConfig};
use vietsu_api::router::build_app_router;
use vietsu_api::state::AppState;
use vietsu_db::models::admin::{Admin, CreateAdmin};
use vietsu_db::repositories::AdminRepo;

/// HMAC secret used by test VNPay signatures.
pub const TEST_VNPAY_SECRET: &str = "vnpay-integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
///
/// VNPay is configured with a known secret so payment-flow tests can sign
/// their own callbacks; SMTP and the chatbot upstream stay unconfigured so
/// their fallback paths run.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-jwt-secret".to_string(),
            token_expiry_hours: 24,
        },
        vnpay: Some(VnpayConfig {
            tmn_code: "VSTEST01".to_string(),
            secret: TEST_VNPAY_SECRET.to_string(),
            pay_url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string(),
            return_url: "http://localhost:5173/payment/return".to_string(),
        }),
        smtp: None,
        chatbot: None,
        upload_dir: std::env::temp_dir()
            .join("vietsu-test-uploads")
            .to_string_lossy()
            .into_owned(),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
///
/// Mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Build the application with the VNPay gateway left unconfigured, for
/// exercising the payment routes' fail-closed behavior.
pub fn build_test_app_without_vnpay(pool: PgPool) -> Router {
    let mut config = test_config();
    config.vnpay = None;
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Create an admin directly in the database and return the row plus a valid
/// bearer token for it.
pub async fn create_test_admin(pool: &PgPool, username: &str) -> (Admin, String) {
    let hashed = hash_password("test_password_123!").expect("hashing should succeed");
    let admin = AdminRepo::create(
        pool,
        &CreateAdmin {
            username: username.to_string(),
            email: format!("{username}@test.vn"),
            password_hash: hashed,
            display_name: None,
        },
    )
    .await
    .expect("admin creation should succeed");

    let token = generate_token(admin.id, &admin.username, &test_config().jwt)
        .expect("token generation should succeed");
    (admin, token)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a GET request with a bearer token.
pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a POST request with a JSON body and a bearer token.
pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a PUT request with a JSON body and a bearer token.
pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method("PUT")
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send a DELETE request with a bearer token.
pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should read")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be valid JSON")
}

/// Assert a status and return the parsed JSON body.
pub async fn assert_json(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), expected);
    body_json(response).await
}
