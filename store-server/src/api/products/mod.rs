//! Product API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    // Catalog browsing, no token required
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/slug/{slug}", get(handler::get_by_slug))
        .route("/by-category/{category_id}", get(handler::list_by_category))
        .route("/drives", get(handler::list_drives))
        .route("/drives/{slug}", get(handler::get_drive_by_slug));

    // Management, requires products:manage
    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/bulk/active", post(handler::bulk_active))
        .route("/bulk/drive", post(handler::bulk_drive))
        .layer(middleware::from_fn(require_permission("products:manage")));

    read_routes.merge(manage_routes)
}
