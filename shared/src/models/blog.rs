//! Blog Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image: Option<String>,
    pub view_count: i64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleCreate {
    pub title: String,
    pub slug: String,
    pub body: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub body: Option<String>,
    pub image: Option<String>,
    pub is_active: Option<bool>,
}
