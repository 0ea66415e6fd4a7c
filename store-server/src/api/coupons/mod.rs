//! Coupon API module
//!
//! Any logged-in user may validate a code before checkout; CRUD needs
//! `coupons:manage`.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new().route("/validate", post(handler::validate));

    let manage_routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .layer(middleware::from_fn(require_permission("coupons:manage")));

    user_routes.merge(manage_routes)
}
