//! Wishlist Repository

use super::RepoResult;
use shared::models::WishlistEntry;
use sqlx::SqlitePool;

pub async fn find_by_user(pool: &SqlitePool, user_id: i64) -> RepoResult<Vec<WishlistEntry>> {
    let rows = sqlx::query_as::<_, WishlistEntry>(
        "SELECT w.id, w.user_id, w.product_id, p.title, p.slug, p.price, p.image, w.created_at FROM wishlist w JOIN product p ON w.product_id = p.id WHERE w.user_id = ? AND p.is_active = 1 ORDER BY w.created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

pub async fn contains(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM wishlist WHERE user_id = ? AND product_id = ?",
    )
    .bind(user_id)
    .bind(product_id)
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Toggle membership; returns true when the product is now wishlisted
pub async fn toggle(pool: &SqlitePool, user_id: i64, product_id: i64) -> RepoResult<bool> {
    let removed = sqlx::query("DELETE FROM wishlist WHERE user_id = ? AND product_id = ?")
        .bind(user_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    if removed.rows_affected() > 0 {
        return Ok(false);
    }
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO wishlist (id, user_id, product_id, created_at) VALUES (?1, ?2, ?3, ?4)",
    )
    .bind(shared::util::snowflake_id())
    .bind(user_id)
    .bind(product_id)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(true)
}
