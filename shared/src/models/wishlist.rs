//! Wishlist Model

use serde::{Deserialize, Serialize};

/// Wishlist entry joined with product display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct WishlistEntry {
    pub id: i64,
    pub user_id: i64,
    pub product_id: i64,
    pub title: String,
    pub slug: String,
    pub price: i64,
    pub image: Option<String>,
    pub created_at: i64,
}
