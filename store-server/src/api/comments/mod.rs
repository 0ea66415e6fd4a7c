//! Comment API module
//!
//! Reading a product's comments is public; submitting and liking need a
//! token; moderation needs `comments:manage`.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/comments", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/product/{product_id}", get(handler::list_by_product))
        .route("/product/{product_id}/rating", get(handler::rating));

    let user_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/like", post(handler::like))
        .route("/{id}/unlike", post(handler::unlike));

    let manage_routes = Router::new()
        .route("/{id}", delete(handler::moderate))
        .layer(middleware::from_fn(require_permission("comments:manage")));

    read_routes.merge(user_routes).merge(manage_routes)
}
