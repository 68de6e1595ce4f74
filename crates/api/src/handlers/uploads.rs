//! Handler for `/uploads`: admin-only multipart media upload. Files land in
//! the configured upload directory and are served back under `/uploads/`.

use std::path::Path as FsPath;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use vietsu_core::error::CoreError;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Per-file size cap (10 MiB), matching the router body limit.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Extensions accepted for images and narration audio.
const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "mp3", "wav", "ogg"];

/// Metadata returned for one stored file.
#[derive(Debug, Serialize)]
pub struct UploadedFile {
    /// Name on disk, unique per upload.
    pub filename: String,
    /// Public path the file is served from.
    pub url: String,
    pub size_bytes: usize,
}

/// Sanitize a client filename down to its extension, lowercased.
fn extension_of(filename: &str) -> Option<String> {
    FsPath::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

/// Build a collision-resistant stored name: timestamp + random suffix.
fn stored_name(extension: &str) -> String {
    let suffix: String = rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!("{}-{}.{}", Utc::now().format("%Y%m%d%H%M%S"), suffix, extension)
}

/// POST /uploads (admin)
///
/// Accepts one or more files in a multipart body. The client filename is
/// never trusted: only its extension survives, checked against the media
/// allow-list, and the stored name is generated server-side.
pub async fn upload(
    admin: AuthAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    tokio::fs::create_dir_all(&state.config.upload_dir)
        .await
        .map_err(|e| AppError::InternalError(format!("Upload directory error: {e}")))?;

    let mut stored = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let Some(original) = field.file_name().map(str::to_string) else {
            continue;
        };

        let extension = extension_of(&original).ok_or_else(|| {
            AppError::Core(CoreError::Validation(format!(
                "File '{original}' has no extension"
            )))
        })?;
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "File type '.{extension}' is not allowed"
            ))));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "File '{original}' is empty"
            ))));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Core(CoreError::Validation(format!(
                "File '{original}' exceeds the {MAX_UPLOAD_BYTES}-byte limit"
            ))));
        }

        let filename = stored_name(&extension);
        let path = FsPath::new(&state.config.upload_dir).join(&filename);
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

        tracing::info!(
            admin_id = admin.admin_id,
            filename = %filename,
            size_bytes = bytes.len(),
            "File uploaded"
        );

        stored.push(UploadedFile {
            url: format!("/uploads/{filename}"),
            filename,
            size_bytes: bytes.len(),
        });
    }

    if stored.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No files found in upload".into(),
        )));
    }

    Ok((StatusCode::CREATED, Json(DataResponse { data: stored })))
}
