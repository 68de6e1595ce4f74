//! Handlers for the VNPay gateway flow: redirect URL creation and the two
//! callback channels (browser return and server-to-server IPN).

use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use vietsu_core::error::CoreError;
use vietsu_core::payment::{
    build_payment_url, verify_callback, CallbackVerification, MerchantCredentials,
    PaymentUrlRequest,
};
use vietsu_db::repositories::OrderRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /payment/vnpay/create-url`.
#[derive(Debug, Deserialize)]
pub struct CreateUrlRequest {
    pub order_code: String,
}

/// Response body carrying the signed redirect URL.
#[derive(Debug, Serialize)]
pub struct CreateUrlResponse {
    pub payment_url: String,
    pub order_code: String,
    /// Whole VND charged when the customer completes payment.
    pub amount: i64,
}

/// Outcome of the browser return channel, rendered for the frontend.
#[derive(Debug, Serialize)]
pub struct ReturnResponse {
    #[serde(flatten)]
    pub verification: CallbackVerification,
    /// Order status after the callback was applied.
    pub order_status: Option<String>,
}

/// VNPay's expected IPN acknowledgement shape.
#[derive(Debug, Serialize)]
pub struct IpnResponse {
    #[serde(rename = "RspCode")]
    pub rsp_code: &'static str,
    #[serde(rename = "Message")]
    pub message: &'static str,
}

/// Best-effort client IP for `vnp_IpAddr`: proxy header first, else loopback.
fn client_ip(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| "127.0.0.1".to_string())
}

/// POST /payment/vnpay/create-url
///
/// Build a signed redirect URL for a pending VNPay order. The amount comes
/// from the stored order, never from the request. Fails with a clear error
/// when the gateway is not configured.
pub async fn create_url(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateUrlRequest>,
) -> AppResult<impl IntoResponse> {
    let vnpay = state.config.vnpay.as_ref().ok_or_else(|| {
        AppError::InternalError("VNPay gateway is not configured".into())
    })?;

    let order = OrderRepo::find_by_code(&state.pool, &input.order_code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Order",
                key: input.order_code.clone(),
            })
        })?;

    if order.order.payment_method != "vnpay" {
        return Err(AppError::Core(CoreError::Validation(
            "Order was not placed with VNPay".into(),
        )));
    }
    if order.order.status == "paid" {
        return Err(AppError::Core(CoreError::Conflict(
            "Order has already been paid".into(),
        )));
    }

    let credentials = MerchantCredentials {
        tmn_code: vnpay.tmn_code.clone(),
        secret: vnpay.secret.clone(),
    };
    let request = PaymentUrlRequest {
        amount: order.order.total_amount,
        order_code: order.order.order_code.clone(),
        order_info: format!("Thanh toan don hang {}", order.order.order_code),
        client_ip: client_ip(&headers),
        return_url: vnpay.return_url.clone(),
        created_at: Utc::now(),
    };

    let payment_url =
        build_payment_url(&vnpay.pay_url, &credentials, &request).map_err(AppError::Core)?;

    tracing::info!(order_code = %order.order.order_code, "VNPay redirect URL created");

    Ok(Json(DataResponse {
        data: CreateUrlResponse {
            payment_url,
            order_code: order.order.order_code,
            amount: order.order.total_amount,
        },
    }))
}

/// Apply a verified callback to the referenced order and return its
/// resulting status.
///
/// Success moves the order to `paid` and records the gateway transaction.
/// A verified non-success stores the response code but can never downgrade
/// an order that is already paid. Forged callbacks touch nothing.
async fn apply_callback(
    state: &AppState,
    verification: &CallbackVerification,
) -> AppResult<Option<String>> {
    if !verification.signature_valid {
        tracing::warn!(
            order_code = verification.order_code.as_deref().unwrap_or("?"),
            "VNPay callback with invalid signature rejected"
        );
        return Ok(None);
    }

    let Some(order_code) = verification.order_code.as_deref() else {
        return Ok(None);
    };

    let updated = if verification.success {
        let transaction_no = verification.transaction_no.as_deref().unwrap_or("");
        let response_code = verification.response_code.as_deref().unwrap_or("");
        let order =
            OrderRepo::record_payment(&state.pool, order_code, transaction_no, response_code)
                .await?;
        if order.is_some() {
            tracing::info!(order_code, transaction_no, "VNPay payment recorded");
        }
        order
    } else {
        let response_code = verification.response_code.as_deref().unwrap_or("");
        let order =
            OrderRepo::record_payment_failure(&state.pool, order_code, response_code).await?;
        tracing::info!(order_code, response_code, "VNPay non-success callback recorded");
        order
    };

    match updated {
        Some(order) => Ok(Some(order.status)),
        // Unknown order, or a non-success callback against a paid order.
        None => {
            let existing = OrderRepo::find_by_code(&state.pool, order_code).await?;
            Ok(existing.map(|o| o.order.status))
        }
    }
}

/// GET /payment/vnpay/return
///
/// Browser return channel. Verification outcomes are data, not errors: a
/// forged or declined callback still renders 200 with the structured result
/// so the frontend can show the right page.
pub async fn vnpay_return(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    // Without a merchant secret no signature can be checked, so every
    // callback counts as unverified. Never verify against an empty key.
    let verification = match state.config.vnpay.as_ref() {
        Some(vnpay) => verify_callback(params, &vnpay.secret),
        None => {
            tracing::warn!("VNPay return callback received but the gateway is not configured");
            CallbackVerification::unverifiable()
        }
    };
    let order_status = apply_callback(&state, &verification).await?;

    Ok(Json(DataResponse {
        data: ReturnResponse {
            verification,
            order_status,
        },
    }))
}

/// GET /payment/vnpay/ipn
///
/// Server-to-server confirmation channel. VNPay retries until it receives
/// the acknowledgement shape it expects, so every verification outcome maps
/// to a 200 with the gateway's response codes.
pub async fn vnpay_ipn(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<Json<IpnResponse>> {
    let Some(vnpay) = state.config.vnpay.as_ref() else {
        tracing::warn!("VNPay IPN received but the gateway is not configured");
        return Ok(Json(IpnResponse {
            rsp_code: "97",
            message: "Invalid signature",
        }));
    };

    let verification = verify_callback(params, &vnpay.secret);

    if !verification.signature_valid {
        return Ok(Json(IpnResponse {
            rsp_code: "97",
            message: "Invalid signature",
        }));
    }

    let order_status = apply_callback(&state, &verification).await?;
    if order_status.is_none() {
        return Ok(Json(IpnResponse {
            rsp_code: "01",
            message: "Order not found",
        }));
    }

    Ok(Json(IpnResponse {
        rsp_code: "00",
        message: "Confirm Success",
    }))
}
