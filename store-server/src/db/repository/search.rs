//! Search Repository
//!
//! History log plus a per-query counter used for suggestion ranking.

use super::RepoResult;
use shared::models::PopularSearch;
use sqlx::SqlitePool;

/// Append to the search history, attributed to a user or a session key
pub async fn log_search(
    pool: &SqlitePool,
    user_id: Option<i64>,
    session_key: Option<&str>,
    query: &str,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO search_history (id, user_id, session_key, query, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(user_id)
    .bind(session_key)
    .bind(query)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Upsert the popular-search counter: count + 1, last_searched = now
pub async fn bump_popular(pool: &SqlitePool, query: &str) -> RepoResult<()> {
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO popular_search (id, query, count, last_searched) VALUES (?1, ?2, 1, ?3) ON CONFLICT(query) DO UPDATE SET count = count + 1, last_searched = ?3",
    )
    .bind(shared::util::snowflake_id())
    .bind(query)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Popular queries matching a prefix, most searched first
pub async fn suggest(pool: &SqlitePool, prefix: &str, limit: i64) -> RepoResult<Vec<PopularSearch>> {
    let pattern = format!("{prefix}%");
    let rows = sqlx::query_as::<_, PopularSearch>(
        "SELECT id, query, count, last_searched FROM popular_search WHERE query LIKE ? ORDER BY count DESC, last_searched DESC LIMIT ?",
    )
    .bind(&pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn top_popular(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<PopularSearch>> {
    let rows = sqlx::query_as::<_, PopularSearch>(
        "SELECT id, query, count, last_searched FROM popular_search ORDER BY count DESC, last_searched DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}
