//! User Model

use serde::{Deserialize, Serialize};

/// User entity
///
/// Customers authenticate by phone + OTP; staff accounts additionally
/// carry an argon2 password hash. `password_hash` never leaves the
/// server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub phone: String,
    pub name: Option<String>,
    pub email: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// "customer" | "staff" | "admin"
    pub role: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub is_active: Option<bool>,
}

/// One-time login code row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OtpCode {
    pub id: i64,
    pub phone: String,
    pub code: String,
    pub expires_at: i64,
    pub consumed: bool,
    pub created_at: i64,
}
