//! Showcase API module (sliders and banners)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/showcase", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new().route("/", get(handler::active));

    let manage_routes = Router::new()
        .route("/sliders", post(handler::create_slider))
        .route("/sliders/{id}", put(handler::update_slider))
        .route("/banners", post(handler::create_banner))
        .route("/bulk/active", post(handler::bulk_active))
        .route("/purge-expired", post(handler::purge_expired))
        .layer(middleware::from_fn(require_permission("showcase:manage")));

    read_routes.merge(manage_routes)
}
