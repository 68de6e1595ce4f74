//! Repository for the `orders` and `order_items` tables.

use sqlx::PgPool;
use vietsu_core::types::DbId;

use crate::models::order::{CreateOrder, Order, OrderItem, OrderWithItems};

const COLUMNS: &str = "id, order_code, customer_name, customer_email, customer_phone, \
    shipping_address, total_amount, payment_method, status, vnpay_transaction_id, \
    vnpay_response_code, notes, created_at, updated_at";

const ITEM_COLUMNS: &str =
    "id, order_id, product_id, product_name, product_slug, price, quantity, subtotal";

/// Provides checkout, lookup, and status transitions for orders.
pub struct OrderRepo;

impl OrderRepo {
    /// Insert an order header plus its items in one transaction, so a crash
    /// mid-checkout cannot leave a header without items.
    ///
    /// A duplicate `order_code` surfaces as a unique-constraint violation on
    /// `uq_orders_order_code`; nothing is written in that case.
    pub async fn create(pool: &PgPool, input: &CreateOrder) -> Result<OrderWithItems, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_order = format!(
            "INSERT INTO orders
                (order_code, customer_name, customer_email, customer_phone,
                 shipping_address, total_amount, payment_method, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        let order = sqlx::query_as::<_, Order>(&insert_order)
            .bind(&input.order_code)
            .bind(&input.customer_name)
            .bind(&input.customer_email)
            .bind(&input.customer_phone)
            .bind(&input.shipping_address)
            .bind(input.total_amount)
            .bind(&input.payment_method)
            .bind(&input.notes)
            .fetch_one(&mut *tx)
            .await?;

        let insert_item = format!(
            "INSERT INTO order_items
                (order_id, product_id, product_name, product_slug, price, quantity, subtotal)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {ITEM_COLUMNS}"
        );
        let mut items = Vec::with_capacity(input.items.len());
        for line in &input.items {
            let item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(order.id)
                .bind(line.product_id)
                .bind(&line.product_name)
                .bind(&line.product_slug)
                .bind(line.price)
                .bind(line.quantity)
                .bind(line.subtotal)
                .fetch_one(&mut *tx)
                .await?;
            items.push(item);
        }

        tx.commit().await?;
        Ok(OrderWithItems { order, items })
    }

    /// Find an order (with items) by its external order code.
    pub async fn find_by_code(
        pool: &PgPool,
        order_code: &str,
    ) -> Result<Option<OrderWithItems>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders WHERE order_code = $1");
        let Some(order) = sqlx::query_as::<_, Order>(&query)
            .bind(order_code)
            .fetch_optional(pool)
            .await?
        else {
            return Ok(None);
        };

        let items = Self::items_for(pool, order.id).await?;
        Ok(Some(OrderWithItems { order, items }))
    }

    /// List all order headers, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Order>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM orders ORDER BY created_at DESC");
        sqlx::query_as::<_, Order>(&query).fetch_all(pool).await
    }

    /// List items belonging to an order.
    pub async fn items_for(pool: &PgPool, order_id: DbId) -> Result<Vec<OrderItem>, sqlx::Error> {
        let query = format!("SELECT {ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY id");
        sqlx::query_as::<_, OrderItem>(&query)
            .bind(order_id)
            .fetch_all(pool)
            .await
    }

    /// Set the status directly (admin back office). Gateway fields are
    /// never touched here; only the notes column changes alongside status.
    pub async fn update_status(
        pool: &PgPool,
        order_code: &str,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET status = $2, notes = COALESCE($3, notes)
             WHERE order_code = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_code)
            .bind(status)
            .bind(notes)
            .fetch_optional(pool)
            .await
    }

    /// Record a successful gateway payment: status becomes `paid` and the
    /// gateway transaction id / response code are stored.
    pub async fn record_payment(
        pool: &PgPool,
        order_code: &str,
        transaction_id: &str,
        response_code: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET
                status = 'paid',
                vnpay_transaction_id = $2,
                vnpay_response_code = $3
             WHERE order_code = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_code)
            .bind(transaction_id)
            .bind(response_code)
            .fetch_optional(pool)
            .await
    }

    /// Record a verified-but-unsuccessful gateway callback.
    ///
    /// Stores the response code but never moves an order out of `paid`, so
    /// a delayed or duplicate non-success callback cannot downgrade a
    /// completed payment.
    pub async fn record_payment_failure(
        pool: &PgPool,
        order_code: &str,
        response_code: &str,
    ) -> Result<Option<Order>, sqlx::Error> {
        let query = format!(
            "UPDATE orders SET vnpay_response_code = $2
             WHERE order_code = $1 AND status <> 'paid'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Order>(&query)
            .bind(order_code)
            .bind(response_code)
            .fetch_optional(pool)
            .await
    }
}
