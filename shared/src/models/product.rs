//! Product Model

use serde::{Deserialize, Serialize};

/// Product entity
///
/// `price` is in integer minor units. `is_drive` marks a downloadable
/// item (e.g. a device driver) rather than a physical good.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub brand_id: Option<i64>,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub view_count: i64,
    pub is_drive: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub title: String,
    pub slug: String,
    pub brand_id: Option<i64>,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_drive: Option<bool>,
    /// Categories to attach at creation time
    #[serde(default)]
    pub category_ids: Vec<i64>,
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub brand_id: Option<i64>,
    pub price: Option<i64>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_drive: Option<bool>,
    pub is_active: Option<bool>,
}

/// Product with brand name (for list/detail views)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ProductWithBrand {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub brand_id: Option<i64>,
    pub brand_name: Option<String>,
    pub price: i64,
    pub description: Option<String>,
    pub image: Option<String>,
    pub view_count: i64,
    pub is_drive: bool,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Per-product feature name/value row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FeatureValue {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub value: String,
}
