//! Password reset token model.

use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// A row from the `password_reset_tokens` table.
///
/// One token is active per admin at a time: creating a new one marks any
/// previous unused tokens as used. A token is redeemable while `!used` and
/// `expires_at` is in the future.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordResetToken {
    pub id: DbId,
    pub admin_id: DbId,
    pub token: String,
    pub expires_at: Timestamp,
    pub used: bool,
    pub created_at: Timestamp,
}
