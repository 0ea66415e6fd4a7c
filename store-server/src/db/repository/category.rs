//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate};
use sqlx::SqlitePool;

const CATEGORY_SELECT: &str =
    "SELECT id, name, slug, parent_id, image, is_active, created_at, updated_at FROM category";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let sql = format!("{} WHERE is_active = 1 ORDER BY name", CATEGORY_SELECT);
    let rows = sqlx::query_as::<_, Category>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let sql = format!("{} WHERE id = ?", CATEGORY_SELECT);
    let row = sqlx::query_as::<_, Category>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_children(pool: &SqlitePool, parent_id: i64) -> RepoResult<Vec<Category>> {
    let sql = format!(
        "{} WHERE parent_id = ? AND is_active = 1 ORDER BY name",
        CATEGORY_SELECT
    );
    let rows = sqlx::query_as::<_, Category>(&sql)
        .bind(parent_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO category (id, name, slug, parent_id, image, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.slug)
    .bind(data.parent_id)
    .bind(&data.image)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE category SET name = COALESCE(?1, name), slug = COALESCE(?2, slug), parent_id = COALESCE(?3, parent_id), image = COALESCE(?4, image), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.name)
    .bind(&data.slug)
    .bind(data.parent_id)
    .bind(&data.image)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE category SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
