//! Discount basket API module
//!
//! Staff-only. Customer-visible pricing goes through the product
//! detail quote, not this surface.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/discounts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .route("/{id}/assign-all", post(handler::assign_all))
        .route(
            "/{id}/products/{product_id}",
            post(handler::add_product).delete(handler::remove_product),
        )
        .layer(middleware::from_fn(require_permission("discounts:manage")))
}
