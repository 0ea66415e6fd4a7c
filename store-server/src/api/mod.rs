//! API route modules
//!
//! # Structure
//!
//! - [`health`] - health check
//! - [`auth`] - OTP and password login, current user
//! - [`products`] - catalog browsing and product management
//! - [`categories`] - category tree
//! - [`brands`] - brand list
//! - [`cart`] - session cart (ajax envelope)
//! - [`orders`] - checkout, order history, status management
//! - [`coupons`] - coupon validation and management
//! - [`discounts`] - discount basket management
//! - [`search`] - product search, suggestions, popular queries
//! - [`blog`] - articles
//! - [`wishlist`] - per-user wishlist (ajax envelope)
//! - [`comments`] - product comments and ratings (ajax envelope)
//! - [`showcase`] - sliders and banners
//! - [`media`] - file uploads and media serving

pub mod health;

pub mod auth;
pub mod blog;
pub mod brands;
pub mod cart;
pub mod categories;
pub mod comments;
pub mod coupons;
pub mod discounts;
pub mod media;
pub mod orders;
pub mod products;
pub mod search;
pub mod showcase;
pub mod wishlist;

use axum::Router;

use crate::core::ServerState;

// Re-export common types for handlers
pub use crate::utils::{AppResponse, AppResult};

/// Aggregate router over every API resource
pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(products::router())
        .merge(categories::router())
        .merge(brands::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(coupons::router())
        .merge(discounts::router())
        .merge(search::router())
        .merge(blog::router())
        .merge(wishlist::router())
        .merge(comments::router())
        .merge(showcase::router())
        .merge(media::router())
}
