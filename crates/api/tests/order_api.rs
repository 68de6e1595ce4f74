//! HTTP-level integration tests for checkout and order management.

mod common;

use axum::http::StatusCode;
use common::{assert_json, create_test_admin, get, get_auth, post_json, put_json_auth};
use sqlx::PgPool;

/// Standard two-line checkout body used across tests.
fn checkout_body(payment_method: &str) -> serde_json::Value {
    serde_json::json!({
        "customer_name": "Nguyễn Văn A",
        "customer_email": "a.nguyen@test.vn",
        "customer_phone": "0901234567",
        "shipping_address": "1 Lê Lợi, Quận 1, TP.HCM",
        "payment_method": payment_method,
        "items": [
            {
                "product_id": null,
                "product_name": "Mô hình Trần Hưng Đạo",
                "product_slug": "mo-hinh-tran-hung-dao",
                "price": 100000,
                "quantity": 2
            },
            {
                "product_id": null,
                "product_name": "Sách Đại Việt Sử Ký",
                "product_slug": "sach-dai-viet-su-ky",
                "price": 250000,
                "quantity": 1
            }
        ]
    })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_computes_totals_server_side(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app, "/api/orders", checkout_body("cod")).await;
    let json = assert_json(response, StatusCode::CREATED).await;

    let data = &json["data"];
    // 2 x 100000 + 1 x 250000
    assert_eq!(data["total_amount"], 450000);
    assert_eq!(data["status"], "pending");
    assert_eq!(data["payment_method"], "cod");
    assert_eq!(data["items"].as_array().unwrap().len(), 2);
    assert_eq!(data["items"][0]["subtotal"], 200000);

    let code = data["order_code"].as_str().unwrap();
    assert!(code.starts_with("VS"));
    assert_eq!(code.len(), 14);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn checkout_rejects_bad_input(pool: PgPool) {
    let app = common::build_test_app(pool);

    // Empty cart.
    let mut body = checkout_body("cod");
    body["items"] = serde_json::json!([]);
    let response = post_json(app.clone(), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Zero quantity.
    let mut body = checkout_body("cod");
    body["items"][0]["quantity"] = serde_json::json!(0);
    let response = post_json(app.clone(), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Negative price.
    let mut body = checkout_body("cod");
    body["items"][0]["price"] = serde_json::json!(-100);
    let response = post_json(app.clone(), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Unknown payment method.
    let response = post_json(app.clone(), "/api/orders", checkout_body("paypal")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Missing phone.
    let mut body = checkout_body("cod");
    body["customer_phone"] = serde_json::json!("");
    let response = post_json(app, "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn client_supplied_order_code_must_be_unique(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let mut body = checkout_body("cod");
    body["order_code"] = serde_json::json!("ORDER-2024_001");
    let response = post_json(app.clone(), "/api/orders", body.clone()).await;
    let created = assert_json(response, StatusCode::CREATED).await;
    assert_eq!(created["data"]["order_code"], "ORDER-2024_001");

    // Reusing the code conflicts and leaves the first order intact.
    let response = post_json(app.clone(), "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = get(app.clone(), "/api/orders/ORDER-2024_001").await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);

    // Malformed codes are rejected up front.
    let mut body = checkout_body("cod");
    body["order_code"] = serde_json::json!("has spaces!");
    let response = post_json(app, "/api/orders", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_lookup_by_code_is_public(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/orders", checkout_body("cod")).await;
    let created = assert_json(response, StatusCode::CREATED).await;
    let code = created["data"]["order_code"].as_str().unwrap().to_string();

    let response = get(app.clone(), &format!("/api/orders/{code}")).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["order_code"], code.as_str());
    assert_eq!(json["data"]["items"].as_array().unwrap().len(), 2);

    let response = get(app, "/api/orders/VSDOESNOTEXIST").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn order_list_requires_auth(pool: PgPool) {
    let (_admin, token) = create_test_admin(&pool, "orderadmin").await;
    let app = common::build_test_app(pool);

    post_json(app.clone(), "/api/orders", checkout_body("cod")).await;

    let response = get(app.clone(), "/api/orders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = get_auth(app, "/api/orders", &token).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn status_update_enforces_allow_list(pool: PgPool) {
    let (_admin, token) = create_test_admin(&pool, "statusadmin").await;
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/orders", checkout_body("cod")).await;
    let created = assert_json(response, StatusCode::CREATED).await;
    let code = created["data"]["order_code"].as_str().unwrap().to_string();

    // Valid transition with a note.
    let body = serde_json::json!({ "status": "paid", "notes": "Paid in cash on delivery" });
    let response =
        put_json_auth(app.clone(), &format!("/api/orders/{code}/status"), body, &token).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "paid");
    assert_eq!(json["data"]["notes"], "Paid in cash on delivery");

    // Repeating the same update is harmless and leaves gateway fields alone.
    let body = serde_json::json!({ "status": "paid" });
    let response =
        put_json_auth(app.clone(), &format!("/api/orders/{code}/status"), body, &token).await;
    let json = assert_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["status"], "paid");
    assert_eq!(json["data"]["notes"], "Paid in cash on delivery");
    assert!(json["data"]["vnpay_transaction_id"].is_null());

    // Off-list status is rejected.
    let body = serde_json::json!({ "status": "shipped" });
    let response =
        put_json_auth(app.clone(), &format!("/api/orders/{code}/status"), body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Requires auth.
    let request = axum::http::Request::builder()
        .method("PUT")
        .uri(format!("/api/orders/{code}/status"))
        .header("content-type", "application/json")
        .body(axum::body::Body::from(
            serde_json::json!({ "status": "paid" }).to_string(),
        ))
        .unwrap();
    let response = tower::ServiceExt::oneshot(app, request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
