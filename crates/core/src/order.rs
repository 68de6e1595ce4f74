//! Order domain rules: status allow-list, payment methods, order codes,
//! and amount arithmetic.
//!
//! Amounts are whole VND (`i64`); the currency has no fractional unit, so no
//! decimal handling exists anywhere in the order path.

use rand::Rng;

use crate::error::CoreError;

/// Prefix for generated order codes.
pub const ORDER_CODE_PREFIX: &str = "VS";

/// Length of the random alphanumeric suffix in a generated order code.
pub const ORDER_CODE_SUFFIX_LENGTH: usize = 12;

/// Maximum length of an order code (generated or client-supplied).
pub const MAX_ORDER_CODE_LENGTH: usize = 100;

/// Lifecycle status of an order.
///
/// The admin back office may set any of the four values directly; the
/// payment callback path only ever moves `Pending` -> `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Database/string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Parse a status string against the allow-list.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "pending" => Ok(OrderStatus::Pending),
            "paid" => Ok(OrderStatus::Paid),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            other => Err(CoreError::Validation(format!(
                "'{other}' is not a valid order status"
            ))),
        }
    }
}

/// How the customer chose to pay at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// VNPay gateway redirect.
    Vnpay,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Vnpay => "vnpay",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "cod" => Ok(PaymentMethod::Cod),
            "vnpay" => Ok(PaymentMethod::Vnpay),
            other => Err(CoreError::Validation(format!(
                "'{other}' is not a valid payment method"
            ))),
        }
    }
}

/// Generate a fresh order code: `VS` + uppercase alphanumeric suffix.
///
/// The code is the externally visible purchase identifier, distinct from the
/// internal numeric row id, and is enforced unique by the database.
pub fn generate_order_code() -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(ORDER_CODE_SUFFIX_LENGTH)
        .map(|b| (b as char).to_ascii_uppercase())
        .collect();
    format!("{ORDER_CODE_PREFIX}{suffix}")
}

/// Validate a client-supplied order code: non-empty, alphanumeric (plus
/// hyphen/underscore), and within the length bound.
pub fn validate_order_code(code: &str) -> Result<(), CoreError> {
    if code.is_empty() {
        return Err(CoreError::Validation("Order code must not be empty".into()));
    }
    if code.len() > MAX_ORDER_CODE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Order code must be at most {MAX_ORDER_CODE_LENGTH} characters"
        )));
    }
    if !code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(CoreError::Validation(
            "Order code may only contain letters, digits, hyphens, and underscores".into(),
        ));
    }
    Ok(())
}

/// Compute one cart line's subtotal, rejecting non-positive inputs.
pub fn line_subtotal(price: i64, quantity: i64) -> Result<i64, CoreError> {
    if price < 0 {
        return Err(CoreError::Validation("Price must not be negative".into()));
    }
    if quantity <= 0 {
        return Err(CoreError::Validation("Quantity must be positive".into()));
    }
    price.checked_mul(quantity).ok_or_else(|| {
        CoreError::Validation("Line subtotal exceeds the representable amount".into())
    })
}

/// Sum line subtotals into the order total.
pub fn order_total(subtotals: &[i64]) -> Result<i64, CoreError> {
    subtotals.iter().try_fold(0i64, |acc, s| {
        acc.checked_add(*s).ok_or_else(|| {
            CoreError::Validation("Order total exceeds the representable amount".into())
        })
    })
}
