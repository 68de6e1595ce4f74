//! Password-reset token generation.
//!
//! Reset tokens are opaque random strings stored server-side (not signed
//! tokens): the admin receives the plaintext in an emailed link, and the
//! database row enforces single use and a one-hour expiry.

use rand::RngCore;
use sha2::{Digest, Sha256};
use vietsu_core::types::Timestamp;

/// How long a reset token stays redeemable.
pub const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Generate a fresh random reset token (64 hex chars).
///
/// 32 random bytes run through SHA-256 so the token is uniformly hex and
/// carries no structure.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Compute the expiry instant for a token issued now.
pub fn reset_token_expiry(now: Timestamp) -> Timestamp {
    now + chrono::Duration::hours(RESET_TOKEN_TTL_HOURS)
}
