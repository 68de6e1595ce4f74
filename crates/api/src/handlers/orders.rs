//! Handlers for the `/orders` resource: checkout, lookup, and admin
//! status management.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use vietsu_core::error::CoreError;
use vietsu_core::order::{
    generate_order_code, line_subtotal, order_total, validate_order_code, OrderStatus,
    PaymentMethod,
};
use vietsu_core::validation::{require_non_empty, validate_email};
use vietsu_db::models::order::{CartLine, CreateOrder, CreateOrderItem};
use vietsu_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /orders`.
#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    /// Optional caller-chosen order code; generated when omitted. A
    /// duplicate surfaces as a conflict and writes nothing.
    pub order_code: Option<String>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: String,
    pub shipping_address: String,
    pub payment_method: String,
    pub notes: Option<String>,
    pub items: Vec<CartLine>,
}

/// Request body for `PUT /orders/{code}/status`.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
    pub notes: Option<String>,
}

/// POST /orders
///
/// Checkout: validates the header and every cart line, recomputes subtotals
/// and the order total server-side (client-sent totals are ignored), and
/// writes the header plus items atomically under a fresh order code.
pub async fn checkout(
    State(state): State<AppState>,
    Json(input): Json<CheckoutRequest>,
) -> AppResult<impl IntoResponse> {
    require_non_empty(&input.customer_name, "customer_name").map_err(AppError::Core)?;
    require_non_empty(&input.customer_phone, "customer_phone").map_err(AppError::Core)?;
    require_non_empty(&input.shipping_address, "shipping_address").map_err(AppError::Core)?;
    if let Some(ref email) = input.customer_email {
        validate_email(email).map_err(AppError::Core)?;
    }
    let payment_method = PaymentMethod::parse(&input.payment_method).map_err(AppError::Core)?;

    if input.items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Order must contain at least one item".into(),
        )));
    }

    let mut items = Vec::with_capacity(input.items.len());
    let mut subtotals = Vec::with_capacity(input.items.len());
    for line in &input.items {
        require_non_empty(&line.product_name, "product_name").map_err(AppError::Core)?;
        let subtotal = line_subtotal(line.price, line.quantity).map_err(AppError::Core)?;
        subtotals.push(subtotal);
        items.push(CreateOrderItem {
            product_id: line.product_id,
            product_name: line.product_name.clone(),
            product_slug: line.product_slug.clone(),
            price: line.price,
            quantity: line.quantity,
            subtotal,
        });
    }
    let total_amount = order_total(&subtotals).map_err(AppError::Core)?;

    let order_code = match input.order_code {
        Some(code) => {
            validate_order_code(&code).map_err(AppError::Core)?;
            code
        }
        None => generate_order_code(),
    };

    let order = OrderRepo::create(
        &state.pool,
        &CreateOrder {
            order_code,
            customer_name: input.customer_name,
            customer_email: input.customer_email,
            customer_phone: input.customer_phone,
            shipping_address: input.shipping_address,
            total_amount,
            payment_method: payment_method.as_str().to_string(),
            notes: input.notes,
            items,
        },
    )
    .await?;

    tracing::info!(
        order_code = %order.order.order_code,
        total_amount,
        payment_method = payment_method.as_str(),
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: order })))
}

/// GET /orders (auth)
///
/// List all order headers, newest first.
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let orders = OrderRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: orders }))
}

/// GET /orders/{code}
///
/// Public lookup by order code: the code itself is the capability, so a
/// customer can track an order without an account.
pub async fn get_by_code(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> AppResult<impl IntoResponse> {
    let order = OrderRepo::find_by_code(&state.pool, &code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                key: code.clone(),
            })
        })?;
    Ok(Json(DataResponse { data: order }))
}

/// PUT /orders/{code}/status (auth)
///
/// Back-office status change. The status must be on the allow-list; the
/// gateway transaction fields are never touched by this path, so repeating
/// the same update is idempotent with respect to payment data.
pub async fn update_status(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(code): Path<String>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<impl IntoResponse> {
    let status = OrderStatus::parse(&input.status).map_err(AppError::Core)?;

    let order = OrderRepo::update_status(&state.pool, &code, status.as_str(), input.notes.as_deref())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                key: code.clone(),
            })
        })?;

    tracing::info!(
        admin_id = admin.admin_id,
        order_code = %code,
        status = status.as_str(),
        "Order status updated"
    );

    Ok(Json(DataResponse { data: order }))
}
