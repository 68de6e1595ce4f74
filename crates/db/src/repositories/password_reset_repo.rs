//! Repository for the `password_reset_tokens` table.

use sqlx::PgPool;
use vietsu_core::types::{DbId, Timestamp};

use crate::models::password_reset::PasswordResetToken;

const COLUMNS: &str = "id, admin_id, token, expires_at, used, created_at";

/// Provides token issuance and redemption for the password reset flow.
pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Issue a new token for an admin, invalidating any previous unused
    /// tokens so only one is redeemable at a time. Both writes share a
    /// transaction.
    pub async fn create(
        pool: &PgPool,
        admin_id: DbId,
        token: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordResetToken, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("UPDATE password_reset_tokens SET used = TRUE WHERE admin_id = $1 AND used = FALSE")
            .bind(admin_id)
            .execute(&mut *tx)
            .await?;

        let query = format!(
            "INSERT INTO password_reset_tokens (admin_id, token, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(admin_id)
            .bind(token)
            .bind(expires_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(row)
    }

    /// Find a token that is unused and not yet expired.
    pub async fn find_valid(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<PasswordResetToken>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM password_reset_tokens
             WHERE token = $1 AND used = FALSE AND expires_at > NOW()"
        );
        sqlx::query_as::<_, PasswordResetToken>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// Redeem a token: update the admin's password hash and mark the token
    /// used in a single transaction, so a crash cannot leave the password
    /// changed with the token still redeemable (or vice versa).
    ///
    /// Returns `false` if the token was not redeemable (already used,
    /// expired, or unknown).
    pub async fn consume(
        pool: &PgPool,
        token: &str,
        new_password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let claimed = sqlx::query_as::<_, PasswordResetToken>(&format!(
            "UPDATE password_reset_tokens SET used = TRUE
             WHERE token = $1 AND used = FALSE AND expires_at > NOW()
             RETURNING {COLUMNS}"
        ))
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(claimed) = claimed else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query("UPDATE admins SET password_hash = $2 WHERE id = $1")
            .bind(claimed.admin_id)
            .bind(new_password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}
