//! Handlers for the `/admin` resource: registration, login, account
//! management, and the password-reset flow.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use vietsu_core::error::CoreError;
use vietsu_core::types::DbId;
use vietsu_core::validation::{require_non_empty, validate_email, validate_password_strength};
use vietsu_db::models::admin::CreateAdmin;
use vietsu_db::repositories::{AdminRepo, PasswordResetRepo};

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::reset::{generate_reset_token, reset_token_expiry};
use crate::email::Mailer;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /admin/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /admin/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful authentication response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
    pub admin: AdminInfo,
}

/// Public admin info embedded in [`AuthResponse`].
#[derive(Debug, Serialize)]
pub struct AdminInfo {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
}

/// Request body for `POST /admin/forgot-password`.
#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// Request body for `POST /admin/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /admin/register
///
/// Self-registration: creates an admin account with a hashed password.
/// Duplicate username or email maps to a conflict via the `uq_` constraints.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<AdminInfo>>)> {
    require_non_empty(&input.username, "username").map_err(AppError::Core)?;
    validate_email(&input.email).map_err(AppError::Core)?;
    validate_password_strength(&input.password).map_err(AppError::Core)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let admin = AdminRepo::create(
        &state.pool,
        &CreateAdmin {
            username: input.username,
            email: input.email,
            password_hash,
            display_name: input.display_name,
        },
    )
    .await?;

    tracing::info!(admin_id = admin.id, username = %admin.username, "Admin registered");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AdminInfo {
                id: admin.id,
                username: admin.username,
                email: admin.email,
                display_name: admin.display_name,
            },
        }),
    ))
}

/// POST /admin/login
///
/// Authenticate with username + password. Returns a 24-hour bearer token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let admin = AdminRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid username or password".into(),
            ))
        })?;

    let password_valid = verify_password(&input.password, &admin.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid username or password".into(),
        )));
    }

    let token = generate_token(admin.id, &admin.username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(AuthResponse {
        token,
        expires_in: state.config.jwt.token_expiry_hours * 3600,
        admin: AdminInfo {
            id: admin.id,
            username: admin.username,
            email: admin.email,
            display_name: admin.display_name,
        },
    }))
}

/// GET /admin (auth)
///
/// List all admin accounts.
pub async fn list(
    _admin: AuthAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<vietsu_db::models::admin::Admin>>>> {
    let admins = AdminRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: admins }))
}

/// DELETE /admin/{id} (auth)
///
/// Delete another admin account. Deleting your own account is refused.
pub async fn delete(
    admin: AuthAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.admin_id {
        return Err(AppError::Core(CoreError::Validation(
            "You cannot delete your own account".into(),
        )));
    }

    let removed = AdminRepo::delete(&state.pool, id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Admin",
            key: id.to_string(),
        }));
    }

    tracing::info!(admin_id = admin.admin_id, deleted_id = id, "Admin deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /admin/forgot-password
///
/// Issue a single-use, one-hour reset token and email the reset link.
/// Always returns 200 so the endpoint does not leak which emails exist.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(input): Json<ForgotPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_email(&input.email).map_err(AppError::Core)?;

    if let Some(admin) = AdminRepo::find_by_email(&state.pool, &input.email).await? {
        let token = generate_reset_token();
        let expires_at = reset_token_expiry(Utc::now());
        PasswordResetRepo::create(&state.pool, admin.id, &token, expires_at).await?;

        match &state.config.smtp {
            Some(smtp) => {
                let mailer = Mailer::new(smtp.clone())
                    .map_err(|e| AppError::InternalError(format!("Mailer setup error: {e}")))?;
                if let Err(e) = mailer.send_reset_link(&admin.email, &token).await {
                    // Delivery failure must not reveal account existence.
                    tracing::error!(error = %e, "Failed to send reset email");
                }
            }
            None => {
                tracing::info!(admin_id = admin.id, token, "SMTP not configured; reset token logged");
            }
        }
    }

    Ok(Json(serde_json::json!({
        "message": "Nếu email tồn tại, liên kết đặt lại mật khẩu đã được gửi."
    })))
}

/// POST /admin/reset-password
///
/// Redeem a reset token: the password update and the token's used flag are
/// written in one transaction. Expired, used, or unknown tokens all map to
/// the same 400.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_password_strength(&input.password).map_err(AppError::Core)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let redeemed = PasswordResetRepo::consume(&state.pool, &input.token, &password_hash).await?;
    if !redeemed {
        return Err(AppError::Core(CoreError::Validation(
            "Mã đặt lại mật khẩu không hợp lệ hoặc đã hết hạn".into(),
        )));
    }

    Ok(Json(serde_json::json!({ "message": "Mật khẩu đã được cập nhật." })))
}
