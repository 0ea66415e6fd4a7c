//! Comment Model

use serde::{Deserialize, Serialize};

/// Product comment with a 1..=5 star rating, threadable via `parent_id`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Comment {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    pub rating: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub is_active: bool,
    pub created_at: i64,
}

/// Submit comment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreate {
    pub product_id: i64,
    pub parent_id: Option<i64>,
    pub text: String,
    pub rating: i64,
}

/// Comment with author display name (for listing)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CommentWithUser {
    pub id: i64,
    pub product_id: i64,
    pub user_id: i64,
    pub user_name: Option<String>,
    pub parent_id: Option<i64>,
    pub text: String,
    pub rating: i64,
    pub like_count: i64,
    pub dislike_count: i64,
    pub is_active: bool,
    pub created_at: i64,
}
