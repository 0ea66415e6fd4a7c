//! Discount Basket Repository

use super::{RepoError, RepoResult};
use shared::models::{DiscountBasket, DiscountBasketCreate, DiscountBasketUpdate};
use sqlx::SqlitePool;

const BASKET_SELECT: &str =
    "SELECT id, title, discount, start_at, end_at, is_active, created_at, updated_at FROM discount_basket";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<DiscountBasket>> {
    let sql = format!("{} ORDER BY created_at DESC", BASKET_SELECT);
    let rows = sqlx::query_as::<_, DiscountBasket>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiscountBasket>> {
    let sql = format!("{} WHERE id = ?", BASKET_SELECT);
    let row = sqlx::query_as::<_, DiscountBasket>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Baskets containing the product that are active and inside their window.
/// The pricing calculator takes the maximum of these.
pub async fn find_applicable_for_product(
    pool: &SqlitePool,
    product_id: i64,
    now: i64,
) -> RepoResult<Vec<DiscountBasket>> {
    let sql = format!(
        "{} WHERE is_active = 1 AND start_at <= ?1 AND end_at >= ?1 AND id IN (SELECT basket_id FROM discount_item WHERE product_id = ?2)",
        BASKET_SELECT
    );
    let rows = sqlx::query_as::<_, DiscountBasket>(&sql)
        .bind(now)
        .bind(product_id)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn create(pool: &SqlitePool, data: DiscountBasketCreate) -> RepoResult<DiscountBasket> {
    if !(0..=100).contains(&data.discount) {
        return Err(RepoError::Validation(
            "Discount must be between 0 and 100".into(),
        ));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();

    let mut tx = pool.begin().await?;
    sqlx::query(
        "INSERT INTO discount_basket (id, title, discount, start_at, end_at, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.title)
    .bind(data.discount)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(now)
    .execute(&mut *tx)
    .await?;

    for product_id in &data.product_ids {
        sqlx::query("INSERT OR IGNORE INTO discount_item (basket_id, product_id) VALUES (?, ?)")
            .bind(id)
            .bind(product_id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create discount basket".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: DiscountBasketUpdate,
) -> RepoResult<DiscountBasket> {
    if let Some(d) = data.discount
        && !(0..=100).contains(&d)
    {
        return Err(RepoError::Validation(
            "Discount must be between 0 and 100".into(),
        ));
    }
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE discount_basket SET title = COALESCE(?1, title), discount = COALESCE(?2, discount), start_at = COALESCE(?3, start_at), end_at = COALESCE(?4, end_at), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.title)
    .bind(data.discount)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Discount basket {id} not found"
        )));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Discount basket {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM discount_basket WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Bulk-assign every active product to the basket (admin action)
pub async fn assign_all_products(pool: &SqlitePool, basket_id: i64) -> RepoResult<u64> {
    let basket = find_by_id(pool, basket_id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Discount basket {basket_id} not found")))?;
    let rows = sqlx::query(
        "INSERT OR IGNORE INTO discount_item (basket_id, product_id) SELECT ?, id FROM product WHERE is_active = 1",
    )
    .bind(basket.id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn add_product(pool: &SqlitePool, basket_id: i64, product_id: i64) -> RepoResult<()> {
    sqlx::query("INSERT OR IGNORE INTO discount_item (basket_id, product_id) VALUES (?, ?)")
        .bind(basket_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn remove_product(pool: &SqlitePool, basket_id: i64, product_id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM discount_item WHERE basket_id = ? AND product_id = ?")
        .bind(basket_id)
        .bind(product_id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
