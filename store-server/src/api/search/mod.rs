//! Search API module (public)

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/search", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::search))
        .route("/suggest", get(handler::suggest))
        .route("/popular", get(handler::popular))
}
