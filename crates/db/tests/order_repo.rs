//! Repository-level tests for order persistence invariants.

use sqlx::PgPool;

use vietsu_db::models::order::{CreateOrder, CreateOrderItem};
use vietsu_db::repositories::{OrderRepo, PasswordResetRepo};

fn sample_order(order_code: &str) -> CreateOrder {
    CreateOrder {
        order_code: order_code.to_string(),
        customer_name: "Nguyễn Văn A".into(),
        customer_email: None,
        customer_phone: "0901234567".into(),
        shipping_address: "1 Lê Lợi, Quận 1".into(),
        total_amount: 200_000,
        payment_method: "vnpay".into(),
        notes: None,
        items: vec![CreateOrderItem {
            product_id: None,
            product_name: "Mô hình Trần Hưng Đạo".into(),
            product_slug: "mo-hinh-tran-hung-dao".into(),
            price: 100_000,
            quantity: 2,
            subtotal: 200_000,
        }],
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn create_writes_header_and_items_atomically(pool: PgPool) {
    let created = OrderRepo::create(&pool, &sample_order("VSATOMIC00001")).await.unwrap();
    assert_eq!(created.order.status, "pending");
    assert_eq!(created.items.len(), 1);
    assert_eq!(created.items[0].subtotal, 200_000);

    // A duplicate order code fails the whole transaction.
    let result = OrderRepo::create(&pool, &sample_order("VSATOMIC00001")).await;
    assert!(result.is_err());

    // No partial rows from the failed attempt.
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn payment_failure_cannot_downgrade_paid_order(pool: PgPool) {
    let created = OrderRepo::create(&pool, &sample_order("VSPAID0000001")).await.unwrap();
    let code = created.order.order_code.as_str();

    let paid = OrderRepo::record_payment(&pool, code, "14422574", "00")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(paid.status, "paid");

    // A late declined callback must not touch the paid order.
    let downgraded = OrderRepo::record_payment_failure(&pool, code, "24").await.unwrap();
    assert!(downgraded.is_none());

    let order = OrderRepo::find_by_code(&pool, code).await.unwrap().unwrap();
    assert_eq!(order.order.status, "paid");
    assert_eq!(order.order.vnpay_response_code.as_deref(), Some("00"));
}

#[sqlx::test(migrations = "./migrations")]
async fn record_payment_failure_stores_code_on_pending(pool: PgPool) {
    let created = OrderRepo::create(&pool, &sample_order("VSPEND0000001")).await.unwrap();
    let code = created.order.order_code.as_str();

    let updated = OrderRepo::record_payment_failure(&pool, code, "24")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.status, "pending");
    assert_eq!(updated.vnpay_response_code.as_deref(), Some("24"));
    assert!(updated.vnpay_transaction_id.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn only_latest_reset_token_is_redeemable(pool: PgPool) {
    let admin_id: i64 = sqlx::query_scalar(
        "INSERT INTO admins (username, email, password_hash)
         VALUES ('resetadmin', 'reset@test.vn', 'x') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let expires = chrono::Utc::now() + chrono::Duration::hours(1);
    PasswordResetRepo::create(&pool, admin_id, "token-one", expires).await.unwrap();
    PasswordResetRepo::create(&pool, admin_id, "token-two", expires).await.unwrap();

    // Issuing the second token invalidated the first.
    assert!(PasswordResetRepo::find_valid(&pool, "token-one").await.unwrap().is_none());
    assert!(PasswordResetRepo::find_valid(&pool, "token-two").await.unwrap().is_some());

    // Redemption is single-use.
    assert!(PasswordResetRepo::consume(&pool, "token-two", "new-hash").await.unwrap());
    assert!(!PasswordResetRepo::consume(&pool, "token-two", "other-hash").await.unwrap());

    let hash: String = sqlx::query_scalar("SELECT password_hash FROM admins WHERE id = $1")
        .bind(admin_id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(hash, "new-hash");
}
