//! Showcase Models (home-page sliders and banners)

use serde::{Deserialize, Serialize};

/// Slider entry, shown while active and inside its time window
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Slider {
    pub id: i64,
    pub text: String,
    pub image: String,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub start_at: i64,
    pub end_at: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderCreate {
    pub text: String,
    pub image: String,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub start_at: i64,
    pub end_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderUpdate {
    pub text: Option<String>,
    pub image: Option<String>,
    pub alt: Option<String>,
    pub link: Option<String>,
    pub start_at: Option<i64>,
    pub end_at: Option<i64>,
    pub is_active: Option<bool>,
}

/// Banner entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Banner {
    pub id: i64,
    pub name: String,
    pub text: String,
    pub image: String,
    pub alt: Option<String>,
    pub start_at: i64,
    pub end_at: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerCreate {
    pub name: String,
    pub text: String,
    pub image: String,
    pub alt: Option<String>,
    pub start_at: i64,
    pub end_at: i64,
}
