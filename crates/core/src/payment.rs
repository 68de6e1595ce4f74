//! VNPay gateway protocol: signed redirect URL construction and callback
//! verification.
//!
//! Both directions hash the same canonical form: parameters sorted by key,
//! values URL-encoded, joined as `key=value` with `&`, signed with
//! HMAC-SHA-512 under the merchant secret and hex-encoded. The gateway
//! appends the signature as `vnp_SecureHash`; verification strips it (and
//! the optional `vnp_SecureHashType`), recomputes, and compares.
//!
//! Amounts cross the wire in the gateway's minor-unit convention: whole VND
//! multiplied by 100 outbound, divided by 100 inbound.

use std::collections::BTreeMap;

use chrono::FixedOffset;
use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::CoreError;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Protocol constants
// ---------------------------------------------------------------------------

/// VNPay API version sent as `vnp_Version`.
pub const VNP_VERSION: &str = "2.1.0";

/// Command for payment URL construction (`vnp_Command`).
pub const VNP_COMMAND_PAY: &str = "pay";

/// Currency code (`vnp_CurrCode`); the platform only sells in VND.
pub const VNP_CURR_CODE: &str = "VND";

/// Locale for the hosted payment page (`vnp_Locale`).
pub const VNP_LOCALE: &str = "vn";

/// Order type bucket (`vnp_OrderType`).
pub const VNP_ORDER_TYPE: &str = "other";

/// Response code the gateway sends for a successful payment.
pub const VNP_RESPONSE_SUCCESS: &str = "00";

/// Minutes until the redirect URL expires (`vnp_ExpireDate`), enforced by
/// the gateway, not by us.
pub const VNP_EXPIRE_MINUTES: i64 = 15;

/// The gateway expects amounts in 1/100 VND.
pub const VNP_AMOUNT_SCALE: i64 = 100;

/// Signature parameter name, excluded from its own canonical string.
pub const VNP_SECURE_HASH: &str = "vnp_SecureHash";

/// Legacy hash-type parameter some gateway responses include; also excluded.
pub const VNP_SECURE_HASH_TYPE: &str = "vnp_SecureHashType";

/// Timestamp format the gateway expects (`yyyyMMddHHmmss`, GMT+7).
const VNP_DATE_FORMAT: &str = "%Y%m%d%H%M%S";

/// VNPay timestamps are Indochina time.
const GMT_PLUS_7_SECS: i32 = 7 * 3600;

type HmacSha512 = Hmac<Sha512>;

// ---------------------------------------------------------------------------
// Request construction
// ---------------------------------------------------------------------------

/// Merchant identity for signing: terminal code plus shared secret.
#[derive(Debug, Clone)]
pub struct MerchantCredentials {
    pub tmn_code: String,
    pub secret: String,
}

/// Inputs for building one payment redirect URL.
#[derive(Debug, Clone)]
pub struct PaymentUrlRequest {
    /// Order amount in whole VND (scaled x100 on the wire).
    pub amount: i64,
    /// External order code (`vnp_TxnRef`).
    pub order_code: String,
    /// Human-readable description (`vnp_OrderInfo`).
    pub order_info: String,
    /// Customer's IP address as seen by our server.
    pub client_ip: String,
    /// URL the gateway redirects the browser back to.
    pub return_url: String,
    /// Creation instant; expiry is derived as +15 minutes.
    pub created_at: Timestamp,
}

/// Build the signed redirect URL for the hosted payment page.
///
/// Fails fast when the merchant credentials are blank or the amount is not
/// positive, so misconfiguration surfaces before the customer is redirected.
pub fn build_payment_url(
    pay_url: &str,
    credentials: &MerchantCredentials,
    request: &PaymentUrlRequest,
) -> Result<String, CoreError> {
    if credentials.tmn_code.trim().is_empty() {
        return Err(CoreError::Internal("VNPay merchant code is not configured".into()));
    }
    if credentials.secret.trim().is_empty() {
        return Err(CoreError::Internal("VNPay secret is not configured".into()));
    }
    if request.amount <= 0 {
        return Err(CoreError::Validation("Payment amount must be positive".into()));
    }

    let params = payment_params(&credentials.tmn_code, request)?;
    let query = canonical_query(&params);
    let signature = sign(&query, &credentials.secret);

    Ok(format!("{pay_url}?{query}&{VNP_SECURE_HASH}={signature}"))
}

/// Assemble the sorted parameter set for a payment URL (unsigned).
pub fn payment_params(
    tmn_code: &str,
    request: &PaymentUrlRequest,
) -> Result<BTreeMap<String, String>, CoreError> {
    let scaled_amount = request
        .amount
        .checked_mul(VNP_AMOUNT_SCALE)
        .ok_or_else(|| CoreError::Validation("Payment amount is too large".into()))?;

    let tz = FixedOffset::east_opt(GMT_PLUS_7_SECS)
        .ok_or_else(|| CoreError::Internal("Invalid gateway timezone offset".into()))?;
    let create = request.created_at.with_timezone(&tz);
    let expire = create + chrono::Duration::minutes(VNP_EXPIRE_MINUTES);

    let mut params = BTreeMap::new();
    params.insert("vnp_Version".into(), VNP_VERSION.into());
    params.insert("vnp_Command".into(), VNP_COMMAND_PAY.into());
    params.insert("vnp_TmnCode".into(), tmn_code.into());
    params.insert("vnp_Locale".into(), VNP_LOCALE.into());
    params.insert("vnp_CurrCode".into(), VNP_CURR_CODE.into());
    params.insert("vnp_TxnRef".into(), request.order_code.clone());
    params.insert("vnp_OrderInfo".into(), request.order_info.clone());
    params.insert("vnp_OrderType".into(), VNP_ORDER_TYPE.into());
    params.insert("vnp_Amount".into(), scaled_amount.to_string());
    params.insert("vnp_ReturnUrl".into(), request.return_url.clone());
    params.insert("vnp_IpAddr".into(), request.client_ip.clone());
    params.insert("vnp_CreateDate".into(), create.format(VNP_DATE_FORMAT).to_string());
    params.insert("vnp_ExpireDate".into(), expire.format(VNP_DATE_FORMAT).to_string());
    Ok(params)
}

// ---------------------------------------------------------------------------
// Canonical form and signing
// ---------------------------------------------------------------------------

/// Join sorted parameters as `key=url_encode(value)` with `&`.
///
/// A `BTreeMap` keeps keys in the lexicographic order the gateway signs.
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{k}={}", urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA-512 over the canonical query, lowercase hex.
pub fn sign(canonical: &str, secret: &str) -> String {
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(canonical.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

// ---------------------------------------------------------------------------
// Callback verification
// ---------------------------------------------------------------------------

/// Structured outcome of verifying a gateway callback.
///
/// Verification never errors: handlers always get a result they can render
/// or act on, even for forged or mangled callbacks.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CallbackVerification {
    /// The supplied `vnp_SecureHash` matched our recomputation.
    pub signature_valid: bool,
    /// Signature valid and response code equals the success sentinel.
    pub success: bool,
    /// `vnp_ResponseCode` as sent by the gateway.
    pub response_code: Option<String>,
    /// `vnp_TransactionNo` -- the gateway's transaction id.
    pub transaction_no: Option<String>,
    /// `vnp_TxnRef` -- our order code.
    pub order_code: Option<String>,
    /// Callback amount scaled back to whole VND (`vnp_Amount` / 100).
    pub amount: Option<i64>,
}

impl CallbackVerification {
    /// Result for a callback that cannot be checked at all, e.g. when no
    /// merchant secret is configured. Nothing is extracted from such a
    /// callback so its parameters can never be acted on.
    pub fn unverifiable() -> Self {
        Self {
            signature_valid: false,
            success: false,
            response_code: None,
            transaction_no: None,
            order_code: None,
            amount: None,
        }
    }
}

/// Verify a callback parameter set against the merchant secret.
///
/// Strips `vnp_SecureHash`/`vnp_SecureHashType`, re-sorts and re-encodes the
/// rest, recomputes the HMAC, and compares. A missing hash counts as an
/// invalid signature.
pub fn verify_callback<I, K, V>(params: I, secret: &str) -> CallbackVerification
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let mut sorted: BTreeMap<String, String> = params
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let supplied_hash = sorted.remove(VNP_SECURE_HASH);
    sorted.remove(VNP_SECURE_HASH_TYPE);

    let signature_valid = match supplied_hash {
        Some(ref supplied) => {
            let expected = sign(&canonical_query(&sorted), secret);
            // Hex digests, so an eq_ignore_ascii_case compare is enough.
            expected.eq_ignore_ascii_case(supplied)
        }
        None => false,
    };

    let response_code = sorted.get("vnp_ResponseCode").cloned();
    let success = signature_valid && response_code.as_deref() == Some(VNP_RESPONSE_SUCCESS);

    let amount = sorted
        .get("vnp_Amount")
        .and_then(|a| a.parse::<i64>().ok())
        .map(|a| a / VNP_AMOUNT_SCALE);

    CallbackVerification {
        signature_valid,
        success,
        response_code,
        transaction_no: sorted.get("vnp_TransactionNo").cloned(),
        order_code: sorted.get("vnp_TxnRef").cloned(),
        amount,
    }
}

// ---------------------------------------------------------------------------
// hex encoding helper (no extra dep)
// ---------------------------------------------------------------------------

mod hex {
    /// Encode bytes as a lowercase hex string.
    pub fn encode(bytes: impl AsRef<[u8]>) -> String {
        bytes
            .as_ref()
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn credentials() -> MerchantCredentials {
        MerchantCredentials {
            tmn_code: "VSTEST01".into(),
            secret: "vnpay-test-secret".into(),
        }
    }

    fn request(amount: i64) -> PaymentUrlRequest {
        PaymentUrlRequest {
            amount,
            order_code: "VSABC123XYZ".into(),
            order_info: "Thanh toan don hang VSABC123XYZ".into(),
            client_ip: "203.0.113.7".into(),
            return_url: "https://vietsu.vn/payment/return".into(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 15, 8, 30, 0).unwrap(),
        }
    }

    /// Parse the query string of a built URL back into a parameter map.
    fn parse_query(url: &str) -> BTreeMap<String, String> {
        let query = url.split_once('?').expect("URL must have a query").1;
        query
            .split('&')
            .map(|pair| {
                let (k, v) = pair.split_once('=').expect("key=value pair");
                (
                    k.to_string(),
                    urlencoding::decode(v).expect("valid encoding").into_owned(),
                )
            })
            .collect()
    }

    #[test]
    fn built_url_signature_verifies() {
        let url =
            build_payment_url("https://sandbox.vnpayment.vn/pay", &credentials(), &request(200_000))
                .unwrap();

        let params = parse_query(&url);
        let result = verify_callback(params, "vnpay-test-secret");
        assert!(result.signature_valid, "embedded signature must recompute");
    }

    #[test]
    fn signature_is_deterministic() {
        let a = sign("vnp_Amount=100&vnp_TxnRef=X", "secret");
        let b = sign("vnp_Amount=100&vnp_TxnRef=X", "secret");
        assert_eq!(a, b);
        assert_eq!(a.len(), 128, "SHA-512 hex digest is 128 chars");
    }

    #[test]
    fn any_single_character_mutation_is_rejected() {
        let url =
            build_payment_url("https://sandbox.vnpayment.vn/pay", &credentials(), &request(200_000))
                .unwrap();
        let baseline = parse_query(&url);
        assert!(verify_callback(baseline.clone(), "vnpay-test-secret").signature_valid);

        // Flip one character in every parameter value in turn.
        for key in baseline.keys().filter(|k| *k != VNP_SECURE_HASH) {
            let mut forged = baseline.clone();
            let value = forged.get_mut(key).unwrap();
            let mut chars = value.chars();
            let flipped = match chars.next() {
                Some('0') => '1',
                _ => '0',
            };
            *value = std::iter::once(flipped).chain(chars).collect();

            let result = verify_callback(forged, "vnpay-test-secret");
            assert!(
                !result.signature_valid,
                "mutated '{key}' must invalidate the signature"
            );
        }
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let url =
            build_payment_url("https://sandbox.vnpayment.vn/pay", &credentials(), &request(50_000))
                .unwrap();
        let result = verify_callback(parse_query(&url), "some-other-secret");
        assert!(!result.signature_valid);
    }

    #[test]
    fn amount_round_trips_through_minor_units() {
        for amount in [1i64, 10_000, 200_000, 25_500_000] {
            let url = build_payment_url(
                "https://sandbox.vnpayment.vn/pay",
                &credentials(),
                &request(amount),
            )
            .unwrap();
            let params = parse_query(&url);
            assert_eq!(
                params["vnp_Amount"],
                (amount * VNP_AMOUNT_SCALE).to_string(),
                "outbound amount is x100"
            );

            let result = verify_callback(params, "vnpay-test-secret");
            assert_eq!(result.amount, Some(amount), "inbound amount is /100");
        }
    }

    #[test]
    fn expiry_is_fifteen_minutes_after_creation() {
        let params = payment_params("VSTEST01", &request(100_000)).unwrap();
        // 08:30 UTC is 15:30 in GMT+7.
        assert_eq!(params["vnp_CreateDate"], "20240315153000");
        assert_eq!(params["vnp_ExpireDate"], "20240315154500");
    }

    #[test]
    fn construction_fails_fast_on_misconfiguration() {
        let blank_code = MerchantCredentials {
            tmn_code: " ".into(),
            secret: "s".into(),
        };
        assert!(build_payment_url("https://x", &blank_code, &request(1)).is_err());

        let blank_secret = MerchantCredentials {
            tmn_code: "T".into(),
            secret: "".into(),
        };
        assert!(build_payment_url("https://x", &blank_secret, &request(1)).is_err());

        assert!(build_payment_url("https://x", &credentials(), &request(0)).is_err());
        assert!(build_payment_url("https://x", &credentials(), &request(-5)).is_err());
    }

    #[test]
    fn success_requires_valid_signature_and_success_code() {
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        params.insert("vnp_TxnRef".into(), "VSABC".into());
        params.insert("vnp_ResponseCode".into(), "00".into());
        params.insert("vnp_TransactionNo".into(), "14422574".into());
        params.insert("vnp_Amount".into(), "20000000".into());

        let signature = sign(&canonical_query(&params), "secret");
        params.insert(VNP_SECURE_HASH.into(), signature.clone());

        let ok = verify_callback(params.clone(), "secret");
        assert!(ok.signature_valid && ok.success);
        assert_eq!(ok.transaction_no.as_deref(), Some("14422574"));
        assert_eq!(ok.order_code.as_deref(), Some("VSABC"));
        assert_eq!(ok.amount, Some(200_000));

        // Valid signature, non-success code: verified but not successful.
        let mut declined: BTreeMap<String, String> = BTreeMap::new();
        declined.insert("vnp_TxnRef".into(), "VSABC".into());
        declined.insert("vnp_ResponseCode".into(), "24".into());
        let sig = sign(&canonical_query(&declined), "secret");
        declined.insert(VNP_SECURE_HASH.into(), sig);

        let result = verify_callback(declined, "secret");
        assert!(result.signature_valid);
        assert!(!result.success);
        assert_eq!(result.response_code.as_deref(), Some("24"));
    }

    #[test]
    fn missing_hash_is_invalid() {
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        params.insert("vnp_TxnRef".into(), "VSABC".into());
        let result = verify_callback(params, "secret");
        assert!(!result.signature_valid && !result.success);
    }

    #[test]
    fn hash_type_parameter_is_excluded_from_canonical_form() {
        let mut params: BTreeMap<String, String> = BTreeMap::new();
        params.insert("vnp_TxnRef".into(), "VSABC".into());
        params.insert("vnp_ResponseCode".into(), "00".into());
        let signature = sign(&canonical_query(&params), "secret");
        params.insert(VNP_SECURE_HASH.into(), signature);
        // Gateways sometimes echo the hash type; it must not break verification.
        params.insert(VNP_SECURE_HASH_TYPE.into(), "HmacSHA512".into());

        let result = verify_callback(params, "secret");
        assert!(result.signature_valid && result.success);
    }
}
