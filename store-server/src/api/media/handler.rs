//! Media Upload Handler

use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;
use std::path::PathBuf;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (10MB, driver archives included)
const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

/// Accepted upload extensions
const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "pdf", "zip"];

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub filename: String,
    pub original_name: String,
    pub size: usize,
    pub url: String,
}

fn validate_upload(data: &[u8], ext: &str) -> Result<(), AppError> {
    if data.is_empty() {
        return Err(AppError::validation("Empty file provided"));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::validation(format!(
            "File too large. Maximum size is {}MB",
            MAX_FILE_SIZE / 1024 / 1024
        )));
    }
    if !SUPPORTED_EXTENSIONS.contains(&ext) {
        return Err(AppError::validation(format!(
            "Unsupported file format '{}'. Supported: {}",
            ext,
            SUPPORTED_EXTENSIONS.join(", ")
        )));
    }
    Ok(())
}

/// POST /api/media/upload - store a file under the media root
///
/// Expects a multipart request with a `file` field. The stored name is
/// generated server-side, so clients can never pick a path.
pub async fn upload(
    State(state): State<ServerState>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    let mut field_data: Option<Vec<u8>> = None;
    let mut original_name = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Invalid multipart request: {}", e)))?
    {
        if field.name() == Some("file") {
            original_name = field.file_name().map(|s| s.to_string());
            field_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Multipart error: {}", e)))?
                    .to_vec(),
            );
            break;
        }
    }

    let data = field_data
        .ok_or_else(|| AppError::validation("No 'file' field found. Field name must be 'file'"))?;
    let original_name = original_name
        .ok_or_else(|| AppError::validation("No filename provided in file field"))?;

    let ext = PathBuf::from(&original_name)
        .extension()
        .and_then(|e| e.to_str().map(|s| s.to_ascii_lowercase()))
        .ok_or_else(|| {
            AppError::validation(format!("Invalid file extension for: {}", original_name))
        })?;

    validate_upload(&data, &ext)?;

    let filename = format!("{}.{}", shared::util::snowflake_id(), ext);
    let file_path = state.config.media_dir().join(&filename);

    tokio::fs::write(&file_path, &data)
        .await
        .map_err(|e| AppError::internal(format!("Failed to save file: {}", e)))?;

    tracing::info!(
        original_name = %original_name,
        stored_as = %filename,
        size = data.len(),
        "Media file uploaded"
    );

    let url = format!("/api/media/{}", filename);
    Ok(Json(UploadResponse {
        filename,
        original_name,
        size: data.len(),
        url,
    }))
}

#[cfg(test)]
mod tests {
    use super::{MAX_FILE_SIZE, validate_upload};

    #[test]
    fn upload_validation_checks_size_and_extension() {
        assert!(validate_upload(b"data", "jpg").is_ok());
        assert!(validate_upload(b"data", "zip").is_ok());
        assert!(validate_upload(b"", "jpg").is_err());
        assert!(validate_upload(b"data", "exe").is_err());
        assert!(validate_upload(&vec![0u8; MAX_FILE_SIZE + 1], "jpg").is_err());
    }
}
