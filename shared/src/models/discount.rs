//! Discount Basket Model
//!
//! A discount basket is a named, time-windowed percentage discount that
//! applies to an explicit set of products. Window bounds are UTC millis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DiscountBasket {
    pub id: i64,
    pub title: String,
    /// Percentage in 0..=100
    pub discount: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountBasketCreate {
    pub title: String,
    pub discount: i64,
    pub start_at: i64,
    pub end_at: i64,
    /// Products included in the basket
    #[serde(default)]
    pub product_ids: Vec<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountBasketUpdate {
    pub title: Option<String>,
    pub discount: Option<i64>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub is_active: Option<bool>,
}

impl DiscountBasket {
    /// Whether the basket applies at the given timestamp
    pub fn is_applicable(&self, now: i64) -> bool {
        self.is_active && self.start_at <= now && now <= self.end_at
    }
}
