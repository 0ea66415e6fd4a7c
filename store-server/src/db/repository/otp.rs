//! OTP Code Repository

use super::RepoResult;
use shared::models::OtpCode;
use sqlx::SqlitePool;

/// Store a fresh code for the phone, invalidating any outstanding ones.
/// Re-requesting a code always supersedes the previous one.
pub async fn store_code(
    pool: &SqlitePool,
    phone: &str,
    code: &str,
    expires_at: i64,
) -> RepoResult<()> {
    let now = shared::util::now_millis();
    let mut tx = pool.begin().await?;
    sqlx::query("UPDATE otp_code SET consumed = 1 WHERE phone = ? AND consumed = 0")
        .bind(phone)
        .execute(&mut *tx)
        .await?;
    sqlx::query(
        "INSERT INTO otp_code (id, phone, code, expires_at, consumed, created_at) VALUES (?1, ?2, ?3, ?4, 0, ?5)",
    )
    .bind(shared::util::snowflake_id())
    .bind(phone)
    .bind(code)
    .bind(expires_at)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    tx.commit().await?;
    Ok(())
}

/// Find the latest unconsumed code for the phone
pub async fn find_active(pool: &SqlitePool, phone: &str) -> RepoResult<Option<OtpCode>> {
    let row = sqlx::query_as::<_, OtpCode>(
        "SELECT id, phone, code, expires_at, consumed, created_at FROM otp_code WHERE phone = ? AND consumed = 0 ORDER BY created_at DESC LIMIT 1",
    )
    .bind(phone)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Mark a code as used; codes are single-use
pub async fn consume(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE otp_code SET consumed = 1 WHERE id = ? AND consumed = 0")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Delete expired rows (housekeeping)
pub async fn purge_expired(pool: &SqlitePool, now: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM otp_code WHERE expires_at < ?")
        .bind(now)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
