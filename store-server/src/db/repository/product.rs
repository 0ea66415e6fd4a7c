//! Product Repository

use super::{RepoError, RepoResult};
use shared::models::{FeatureValue, ProductCreate, ProductUpdate, ProductWithBrand};
use sqlx::SqlitePool;

const PRODUCT_WITH_BRAND_SELECT: &str = "SELECT p.id, p.title, p.slug, p.brand_id, b.name as brand_name, p.price, p.description, p.image, p.view_count, p.is_drive, p.is_active, p.created_at, p.updated_at FROM product p LEFT JOIN brand b ON p.brand_id = b.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<ProductWithBrand>> {
    let sql = format!(
        "{} WHERE p.is_active = 1 ORDER BY p.created_at DESC",
        PRODUCT_WITH_BRAND_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<ProductWithBrand>> {
    let sql = format!("{} WHERE p.id = ?", PRODUCT_WITH_BRAND_SELECT);
    let row = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> RepoResult<Option<ProductWithBrand>> {
    let sql = format!(
        "{} WHERE p.slug = ? AND p.is_active = 1",
        PRODUCT_WITH_BRAND_SELECT
    );
    let row = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_category(
    pool: &SqlitePool,
    category_id: i64,
) -> RepoResult<Vec<ProductWithBrand>> {
    let sql = format!(
        "{} JOIN product_category pc ON pc.product_id = p.id WHERE pc.category_id = ? AND p.is_active = 1 ORDER BY p.created_at DESC",
        PRODUCT_WITH_BRAND_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(category_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// Products flagged as downloadable drivers
pub async fn find_drives(pool: &SqlitePool) -> RepoResult<Vec<ProductWithBrand>> {
    let sql = format!(
        "{} WHERE p.is_active = 1 AND p.is_drive = 1 ORDER BY p.created_at DESC",
        PRODUCT_WITH_BRAND_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_drive_by_slug(
    pool: &SqlitePool,
    slug: &str,
) -> RepoResult<Option<ProductWithBrand>> {
    let sql = format!(
        "{} WHERE p.slug = ? AND p.is_active = 1 AND p.is_drive = 1",
        PRODUCT_WITH_BRAND_SELECT
    );
    let row = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(slug)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Other drivers from the same brand, for the drive detail page
pub async fn find_related_drives(
    pool: &SqlitePool,
    brand_id: i64,
    exclude_id: i64,
    limit: i64,
) -> RepoResult<Vec<ProductWithBrand>> {
    let sql = format!(
        "{} WHERE p.brand_id = ? AND p.id != ? AND p.is_active = 1 AND p.is_drive = 1 ORDER BY p.created_at DESC LIMIT ?",
        PRODUCT_WITH_BRAND_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(brand_id)
        .bind(exclude_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn search_by_title(pool: &SqlitePool, query: &str) -> RepoResult<Vec<ProductWithBrand>> {
    let pattern = format!("%{query}%");
    let sql = format!(
        "{} WHERE p.is_active = 1 AND p.title LIKE ? ORDER BY p.view_count DESC",
        PRODUCT_WITH_BRAND_SELECT
    );
    let rows = sqlx::query_as::<_, ProductWithBrand>(&sql)
        .bind(&pattern)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: ProductCreate) -> RepoResult<ProductWithBrand> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO product (id, title, slug, brand_id, price, description, image, is_drive, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?9)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(&data.slug)
    .bind(data.brand_id)
    .bind(data.price)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.is_drive.unwrap_or(false))
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for category_id in &data.category_ids {
        sqlx::query("INSERT OR IGNORE INTO product_category (product_id, category_id) VALUES (?, ?)")
            .bind(id)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create product".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: ProductUpdate,
) -> RepoResult<ProductWithBrand> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE product SET title = COALESCE(?1, title), slug = COALESCE(?2, slug), brand_id = COALESCE(?3, brand_id), price = COALESCE(?4, price), description = COALESCE(?5, description), image = COALESCE(?6, image), is_drive = COALESCE(?7, is_drive), is_active = COALESCE(?8, is_active), updated_at = ?9 WHERE id = ?10",
    )
    .bind(&data.title)
    .bind(&data.slug)
    .bind(data.brand_id)
    .bind(data.price)
    .bind(&data.description)
    .bind(&data.image)
    .bind(data.is_drive)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Product {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query("UPDATE product SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1")
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Atomic view-counter increment; avoids read-modify-write races
pub async fn increment_view_count(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    sqlx::query("UPDATE product SET view_count = view_count + 1 WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn find_features(pool: &SqlitePool, product_id: i64) -> RepoResult<Vec<FeatureValue>> {
    let rows = sqlx::query_as::<_, FeatureValue>(
        "SELECT id, product_id, name, value FROM feature_value WHERE product_id = ? ORDER BY id",
    )
    .bind(product_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Bulk activate/deactivate (admin action)
pub async fn set_active_bulk(pool: &SqlitePool, ids: &[i64], active: bool) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let mut affected = 0u64;
    for id in ids {
        let rows = sqlx::query("UPDATE product SET is_active = ?, updated_at = ? WHERE id = ?")
            .bind(active)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        affected += rows.rows_affected();
    }
    tx.commit().await?;
    Ok(affected)
}

/// Bulk toggle the drive (downloadable) flag (admin action)
pub async fn set_drive_bulk(pool: &SqlitePool, ids: &[i64], is_drive: bool) -> RepoResult<u64> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    let mut affected = 0u64;
    for id in ids {
        let rows = sqlx::query("UPDATE product SET is_drive = ?, updated_at = ? WHERE id = ?")
            .bind(is_drive)
            .bind(now)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        affected += rows.rows_affected();
    }
    tx.commit().await?;
    Ok(affected)
}
