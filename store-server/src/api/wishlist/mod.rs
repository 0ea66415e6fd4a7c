//! Wishlist API module
//!
//! Requires a token (not listed as a public prefix); responses use the
//! ajax `{success, ...}` envelope.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/wishlist", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/toggle/{product_id}", post(handler::toggle))
        .route("/contains/{product_id}", get(handler::contains))
}
