//! One-time login codes
//!
//! Customers authenticate by phone: a 5-digit code valid for 2 minutes,
//! single-use, superseded by any re-request.

use sqlx::SqlitePool;

use crate::db::repository::otp;
use crate::utils::AppError;

/// Code lifetime in milliseconds
pub const OTP_TTL_MS: i64 = 2 * 60 * 1000;

/// Generate a random 5-digit code (10000..=99999)
pub fn generate_code() -> String {
    use rand::Rng;
    let n: u32 = rand::thread_rng().gen_range(10_000..100_000);
    n.to_string()
}

/// Issue a code for the phone and return it.
///
/// Delivery is out of scope here; the caller hands the code to an SMS
/// gateway. In development the code is logged instead.
pub async fn issue(pool: &SqlitePool, phone: &str) -> Result<String, AppError> {
    let code = generate_code();
    let expires_at = shared::util::now_millis() + OTP_TTL_MS;
    otp::store_code(pool, phone, &code, expires_at).await?;
    Ok(code)
}

/// Verify a submitted code: must exist, be unexpired and unconsumed.
/// Consumes the code on success.
pub async fn verify(pool: &SqlitePool, phone: &str, code: &str) -> Result<(), AppError> {
    let row = otp::find_active(pool, phone)
        .await?
        .ok_or_else(|| AppError::invalid("Invalid or expired code"))?;

    if row.expires_at < shared::util::now_millis() {
        return Err(AppError::invalid("Invalid or expired code"));
    }
    if row.code != code {
        return Err(AppError::invalid("Invalid or expired code"));
    }

    otp::consume(pool, row.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_five_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 5);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
            assert!(!code.starts_with('0'));
        }
    }
}
