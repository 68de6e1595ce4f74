//! Integration tests for the chatbot route's database fallback.
//!
//! Tests run with no upstream AI configured, so every answer comes from the
//! character database.

mod common;

use axum::http::StatusCode;
use common::{assert_json, create_test_admin, post_json, post_json_auth};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn fallback_answers_from_character_summaries(pool: PgPool) {
    let (_admin, token) = create_test_admin(&pool, "botadmin").await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "name": "Trần Hưng Đạo",
        "timeline": "1228-1300",
        "summary": "Vị tướng ba lần đánh bại quân Nguyên Mông."
    });
    post_json_auth(app.clone(), "/api/characters", body, &token).await;

    let question = serde_json::json!({ "question": "Trần Hưng Đạo là ai?" });
    let response = post_json(app, "/api/chatbot", question).await;
    let json = assert_json(response, StatusCode::OK).await;

    assert_eq!(json["data"]["source"], "database");
    let answer = json["data"]["answer"].as_str().unwrap();
    assert!(answer.contains("Trần Hưng Đạo"));
    assert!(answer.contains("Nguyên Mông"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn fallback_handles_no_matches(pool: PgPool) {
    let app = common::build_test_app(pool);

    let question = serde_json::json!({ "question": "Napoleon Bonaparte?" });
    let response = post_json(app, "/api/chatbot", question).await;
    let json = assert_json(response, StatusCode::OK).await;

    assert_eq!(json["data"]["source"], "database");
    assert!(json["data"]["answer"].as_str().unwrap().contains("Xin lỗi"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn empty_question_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);

    let question = serde_json::json!({ "question": "  " });
    let response = post_json(app, "/api/chatbot", question).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
