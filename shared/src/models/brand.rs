//! Brand Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Brand {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandCreate {
    pub name: String,
    pub slug: String,
    pub image: Option<String>,
}
