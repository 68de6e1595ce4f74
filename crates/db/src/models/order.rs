//! Order and order item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// An order row from the `orders` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: DbId,
    /// Externally visible purchase identifier, unique, distinct from `id`.
    pub order_code: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub shipping_address: String,
    /// Whole VND, computed server-side as the sum of item subtotals.
    pub total_amount: i64,
    /// `cod` or `vnpay`.
    pub payment_method: String,
    /// `pending`, `paid`, `cancelled`, or `refunded`.
    pub status: String,
    /// Gateway transaction id, set when a VNPay callback verifies.
    pub vnpay_transaction_id: Option<String>,
    /// Last gateway response code recorded for this order.
    pub vnpay_response_code: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An order item row from the `order_items` table.
///
/// Product fields are denormalized at purchase time; `product_id` goes NULL
/// if the product is later deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderItem {
    pub id: DbId,
    pub order_id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub product_slug: String,
    pub price: i64,
    pub quantity: i64,
    pub subtotal: i64,
}

/// One denormalized cart line submitted at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct CartLine {
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub product_slug: String,
    pub price: i64,
    pub quantity: i64,
}

/// DTO for creating an order: validated header fields plus computed lines.
#[derive(Debug, Clone)]
pub struct CreateOrder {
    pub order_code: String,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub shipping_address: String,
    pub total_amount: i64,
    pub payment_method: String,
    pub notes: Option<String>,
    pub items: Vec<CreateOrderItem>,
}

/// One order item with its server-computed subtotal.
#[derive(Debug, Clone)]
pub struct CreateOrderItem {
    pub product_id: Option<DbId>,
    pub product_name: String,
    pub product_slug: String,
    pub price: i64,
    pub quantity: i64,
    pub subtotal: i64,
}

/// An order together with its items, as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderWithItems {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}
