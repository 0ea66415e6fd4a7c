//! Coupon Model

use serde::{Deserialize, Serialize};

/// Coupon entity, referenced by its unique code at checkout
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coupon {
    pub id: i64,
    pub code: String,
    /// Percentage in 0..=100
    pub discount: i64,
    pub start_at: i64,
    pub end_at: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub discount: i64,
    pub start_at: i64,
    pub end_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub code: Option<String>,
    pub discount: Option<i64>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub is_active: Option<bool>,
}

impl Coupon {
    pub fn is_valid_at(&self, now: i64) -> bool {
        self.is_active && self.start_at <= now && now <= self.end_at
    }
}
