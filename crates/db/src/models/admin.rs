//! Admin account model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vietsu_core::types::{DbId, Timestamp};

/// An admin row from the `admins` table.
///
/// `password_hash` is deliberately not serialized.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admin {
    pub id: DbId,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an admin (self-registration).
#[derive(Debug, Clone)]
pub struct CreateAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub display_name: Option<String>,
}
