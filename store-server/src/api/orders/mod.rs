//! Order API module
//!
//! Customers check out, list and cancel their own orders; staff with
//! `orders:manage` move orders along the status graph.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list_mine))
        .route("/checkout", post(handler::checkout))
        .route("/{id}", get(handler::get_by_id))
        .route("/code/{code}", get(handler::get_by_code))
        .route("/{id}/cancel", post(handler::cancel));

    let manage_routes = Router::new()
        .route("/{id}/status", put(handler::set_status))
        .layer(middleware::from_fn(require_permission("orders:manage")));

    user_routes.merge(manage_routes)
}
