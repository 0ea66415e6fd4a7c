//! Media Routes
//!
//! Uploads for product, category and brand images plus downloadable
//! driver archives. Files live flat under the configured media root and
//! are served back by filename.

mod handler;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, State},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use http::header;

use crate::auth::require_permission;
use crate::core::ServerState;

/// Media file response
enum MediaFileResponse {
    Ok(&'static str, Bytes),
    NotFound,
    BadRequest(&'static str),
}

impl IntoResponse for MediaFileResponse {
    fn into_response(self) -> axum::response::Response {
        match self {
            MediaFileResponse::Ok(content_type, content) => (
                http::StatusCode::OK,
                [(header::CONTENT_TYPE, content_type)],
                content,
            )
                .into_response(),
            MediaFileResponse::NotFound => {
                (http::StatusCode::NOT_FOUND, "File not found").into_response()
            }
            MediaFileResponse::BadRequest(msg) => {
                (http::StatusCode::BAD_REQUEST, msg).into_response()
            }
        }
    }
}

/// Filenames are generated server-side; anything that could leave the
/// media root is rejected outright
fn is_safe_filename(filename: &str) -> bool {
    !filename.is_empty()
        && !filename.contains("..")
        && !filename.contains('/')
        && !filename.contains('\\')
}

fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit('.').next().map(|e| e.to_ascii_lowercase()) {
        Some(ext) => match ext.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "pdf" => "application/pdf",
            "zip" => "application/zip",
            _ => "application/octet-stream",
        },
        None => "application/octet-stream",
    }
}

/// Serve media file handler
async fn serve_media_file(
    State(state): State<ServerState>,
    Path(filename): Path<String>,
) -> MediaFileResponse {
    if !is_safe_filename(&filename) {
        return MediaFileResponse::BadRequest("Invalid filename");
    }

    let file_path = state.config.media_dir().join(&filename);
    match tokio::fs::read(&file_path).await {
        Ok(content) => MediaFileResponse::Ok(content_type_for(&filename), content.into()),
        Err(_) => MediaFileResponse::NotFound,
    }
}

/// Build media router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Upload - requires catalog:manage
        .route(
            "/api/media/upload",
            post(handler::upload)
                .layer(middleware::from_fn(require_permission("catalog:manage"))),
        )
        // Serve stored files - public access
        .route("/api/media/{filename}", get(serve_media_file))
}

#[cfg(test)]
mod tests {
    use super::{content_type_for, is_safe_filename};

    #[test]
    fn traversal_filenames_are_rejected() {
        assert!(is_safe_filename("7234982374.jpg"));
        assert!(!is_safe_filename(""));
        assert!(!is_safe_filename("../secrets.db"));
        assert!(!is_safe_filename("a/b.png"));
        assert!(!is_safe_filename("a\\b.png"));
    }

    #[test]
    fn content_types_follow_the_extension() {
        assert_eq!(content_type_for("x.jpg"), "image/jpeg");
        assert_eq!(content_type_for("x.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("x.png"), "image/png");
        assert_eq!(content_type_for("driver.zip"), "application/zip");
        assert_eq!(content_type_for("manual.pdf"), "application/pdf");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
    }
}
