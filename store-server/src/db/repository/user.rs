//! User Repository

use super::{RepoError, RepoResult};
use shared::models::{User, UserUpdate};
use sqlx::SqlitePool;

const USER_SELECT: &str =
    "SELECT id, phone, name, email, password_hash, role, is_active, created_at, updated_at FROM user";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<User>> {
    let sql = format!("{} WHERE id = ?", USER_SELECT);
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<Option<User>> {
    let sql = format!("{} WHERE phone = ?", USER_SELECT);
    let row = sqlx::query_as::<_, User>(&sql)
        .bind(phone)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Fetch the user for a phone number, creating a customer account on
/// first login (OTP flow has no separate registration step).
pub async fn find_or_create_by_phone(pool: &SqlitePool, phone: &str) -> RepoResult<User> {
    if let Some(user) = find_by_phone(pool, phone).await? {
        return Ok(user);
    }
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO user (id, phone, role, is_active, created_at, updated_at) VALUES (?1, ?2, 'customer', 1, ?3, ?3)",
    )
    .bind(id)
    .bind(phone)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create user".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: UserUpdate) -> RepoResult<User> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE user SET name = COALESCE(?1, name), email = COALESCE(?2, email), is_active = COALESCE(?3, is_active), updated_at = ?4 WHERE id = ?5",
    )
    .bind(&data.name)
    .bind(&data.email)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("User {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("User {id} not found")))
}
