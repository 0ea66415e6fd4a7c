//! Blog Repository

use super::{RepoError, RepoResult};
use shared::models::{Article, ArticleCreate, ArticleUpdate};
use sqlx::SqlitePool;

const ARTICLE_SELECT: &str =
    "SELECT id, title, slug, body, image, view_count, is_active, created_at, updated_at FROM article";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Article>> {
    let sql = format!(
        "{} WHERE is_active = 1 ORDER BY created_at DESC",
        ARTICLE_SELECT
    );
    let rows = sqlx::query_as::<_, Article>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Article>> {
    let sql = format!("{} WHERE id = ?", ARTICLE_SELECT);
    let row = sqlx::query_as::<_, Article>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<Article>> {
    let sql = format!("{} WHERE slug = ? AND is_active = 1", ARTICLE_SELECT);
    let row = sqlx::query_as::<_, Article>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Atomic view-counter increment, same pattern as product views
pub async fn increment_view_count(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE article SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn create(pool: &SqlitePool, data: ArticleCreate) -> RepoResult<Article> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO article (id, title, slug, body, image, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.body)
    .bind(&data.image)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create article".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: ArticleUpdate) -> RepoResult<Article> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE article SET title = COALESCE(?1, title), slug = COALESCE(?2, slug), body = COALESCE(?3, body), image = COALESCE(?4, image), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(&data.body)
    .bind(&data.image)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Article {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Article {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE article SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
