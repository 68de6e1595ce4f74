//! HTTP-level integration tests for admin registration, login, account
//! management, and the password-reset flow.

mod common;

use axum::http::StatusCode;
use common::{
    assert_json, body_json, create_test_admin, delete_auth, get, get_auth, post_json,
};
use sqlx::PgPool;

use vietsu_db::repositories::{AdminRepo, PasswordResetRepo};

/// Register via the API and return the created admin's JSON.
async fn register(app: axum::Router, username: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "username": username,
        "email": format!("{username}@test.vn"),
        "password": "secure_password_1",
    });
    let response = post_json(app, "/api/admin/register", body).await;
    assert_json(response, StatusCode::CREATED).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_then_login(pool: PgPool) {
    let app = common::build_test_app(pool);

    let created = register(app.clone(), "firstadmin").await;
    assert_eq!(created["data"]["username"], "firstadmin");
    assert!(
        created["data"].get("password_hash").is_none(),
        "password hash must never be serialized"
    );

    let body = serde_json::json!({ "username": "firstadmin", "password": "secure_password_1" });
    let response = post_json(app, "/api/admin/login", body).await;
    let json = assert_json(response, StatusCode::OK).await;

    assert!(json["token"].is_string());
    assert!(json["expires_in"].is_number());
    assert_eq!(json["admin"]["username"], "firstadmin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_username_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "duped").await;

    let body = serde_json::json!({
        "username": "duped",
        "email": "other@test.vn",
        "password": "secure_password_1",
    });
    let response = post_json(app, "/api/admin/register", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn weak_password_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "username": "weakling",
        "email": "weak@test.vn",
        "password": "short",
    });
    let response = post_json(app, "/api/admin/register", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_wrong_password_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    register(app.clone(), "victim").await;

    let body = serde_json::json!({ "username": "victim", "password": "incorrect_password" });
    let response = post_json(app, "/api/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_unknown_user_returns_401(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = serde_json::json!({ "username": "ghost", "password": "whatever_123" });
    let response = post_json(app, "/api/admin/login", body).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_list_requires_auth(pool: PgPool) {
    let (_admin, token) = create_test_admin(&pool, "lister").await;
    let app = common::build_test_app(pool);

    let response = get(app.clone(), "/api/admin").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/admin", &token).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_cannot_delete_self(pool: PgPool) {
    let (admin, token) = create_test_admin(&pool, "selfdel").await;
    let app = common::build_test_app(pool);

    let response = delete_auth(app, &format!("/api/admin/{}", admin.id), &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn admin_can_delete_other(pool: PgPool) {
    let (_first, token) = create_test_admin(&pool, "keeper").await;
    let (second, _) = create_test_admin(&pool, "goner").await;
    let app = common::build_test_app(pool.clone());

    let response = delete_auth(app, &format!("/api/admin/{}", second.id), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = AdminRepo::list(&pool).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].username, "keeper");
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn forgot_password_does_not_leak_existence(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Unknown email still answers 200 with the same message shape.
    let body = serde_json::json!({ "email": "nobody@test.vn" });
    let response = post_json(app, "/api/admin/forgot-password", body).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert!(json["message"].is_string());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn reset_password_full_flow(pool: PgPool) {
    let (admin, _) = create_test_admin(&pool, "resetter").await;
    let app = common::build_test_app(pool.clone());

    let body = serde_json::json!({ "email": "resetter@test.vn" });
    let response = post_json(app.clone(), "/api/admin/forgot-password", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // SMTP is unconfigured in tests, so fish the token out of the database.
    let token: String =
        sqlx::query_scalar("SELECT token FROM password_reset_tokens WHERE admin_id = $1")
            .bind(admin.id)
            .fetch_one(&pool)
            .await
            .unwrap();

    let body = serde_json::json!({ "token": token, "password": "brand_new_password" });
    let response = post_json(app.clone(), "/api/admin/reset-password", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    // Old password no longer works, new one does.
    let old = serde_json::json!({ "username": "resetter", "password": "test_password_123!" });
    let response = post_json(app.clone(), "/api/admin/login", old).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let new = serde_json::json!({ "username": "resetter", "password": "brand_new_password" });
    let response = post_json(app.clone(), "/api/admin/login", new).await;
    assert_eq!(response.status(), StatusCode::OK);

    // The token is single-use.
    let body = serde_json::json!({ "token": token, "password": "yet_another_password" });
    let response = post_json(app, "/api/admin/reset-password", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_reset_token_is_rejected(pool: PgPool) {
    let (admin, _) = create_test_admin(&pool, "lateuser").await;

    let expired_at = chrono::Utc::now() - chrono::Duration::hours(2);
    PasswordResetRepo::create(&pool, admin.id, "deadbeef".repeat(8).as_str(), expired_at)
        .await
        .unwrap();

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "token": "deadbeef".repeat(8),
        "password": "brand_new_password",
    });
    let response = post_json(app, "/api/admin/reset-password", body).await;
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
