//! Cart API module
//!
//! All cart endpoints are public; the cart belongs to a session key
//! (the `X-Session-Key` header for guests, the user id once logged in)
//! and responses use the ajax `{success, ...}` envelope.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/cart", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::summary))
        .route("/count", get(handler::count))
        .route("/add", post(handler::add))
        .route("/update", post(handler::update))
        .route("/remove", post(handler::remove))
        .route("/clear", post(handler::clear))
}
