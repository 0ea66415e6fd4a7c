//! Coupon Repository

use super::{RepoError, RepoResult};
use shared::models::{Coupon, CouponCreate, CouponUpdate};
use sqlx::SqlitePool;

const COUPON_SELECT: &str =
    "SELECT id, code, discount, start_at, end_at, is_active, created_at, updated_at FROM coupon";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Coupon>> {
    let sql = format!("{} ORDER BY created_at DESC", COUPON_SELECT);
    let rows = sqlx::query_as::<_, Coupon>(&sql).fetch_all(pool).await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Coupon>> {
    let sql = format!("{} WHERE id = ?", COUPON_SELECT);
    let row = sqlx::query_as::<_, Coupon>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Coupon>> {
    let sql = format!("{} WHERE code = ?", COUPON_SELECT);
    let row = sqlx::query_as::<_, Coupon>(&sql)
        .bind(code)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: CouponCreate) -> RepoResult<Coupon> {
    if !(0..=100).contains(&data.discount) {
        return Err(RepoError::Validation(
            "Discount must be between 0 and 100".into(),
        ));
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO coupon (id, code, discount, start_at, end_at, is_active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?6)",
    )
    .bind(id)
    .bind(&data.code)
    .bind(data.discount)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create coupon".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CouponUpdate) -> RepoResult<Coupon> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE coupon SET code = COALESCE(?1, code), discount = COALESCE(?2, discount), start_at = COALESCE(?3, start_at), end_at = COALESCE(?4, end_at), is_active = COALESCE(?5, is_active), updated_at = ?6 WHERE id = ?7",
    )
    .bind(&data.code)
    .bind(data.discount)
    .bind(data.start_at)
    .bind(data.end_at)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Coupon {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Coupon {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE coupon SET is_active = 0, updated_at = ? WHERE id = ? AND is_active = 1",
    )
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    Ok(rows.rows_affected() > 0)
}
