//! Authentication routes
//!
//! - `/api/auth/otp/request`, `/api/auth/otp/verify`, `/api/auth/login`: public
//! - `/api/auth/me`: requires a token (global auth middleware)

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/otp/request", post(handler::otp_request))
        .route("/api/auth/otp/verify", post(handler::otp_verify))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/me", get(handler::me).put(handler::update_me))
}
