//! Search Models

use serde::{Deserialize, Serialize};

/// One logged search, attributed to a user or a session key
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SearchHistory {
    pub id: i64,
    pub user_id: Option<i64>,
    pub session_key: Option<String>,
    pub query: String,
    pub created_at: i64,
}

/// Aggregated per-query counter used for suggestion ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PopularSearch {
    pub id: i64,
    pub query: String,
    pub count: i64,
    pub last_searched: i64,
}
