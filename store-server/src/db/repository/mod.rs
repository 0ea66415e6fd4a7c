//! Repository Module
//!
//! Free-function CRUD operations per resource, all taking a `&SqlitePool`.

// Catalog
pub mod brand;
pub mod category;
pub mod product;

// Pricing
pub mod coupon;
pub mod discount;

// Orders
pub mod order;

// Users
pub mod otp;
pub mod user;

// Content
pub mod blog;
pub mod comment;
pub mod search;
pub mod showcase;
pub mod wishlist;

use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => RepoError::NotFound(err.to_string()),
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(err.to_string())
            }
            _ => RepoError::Database(err.to_string()),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;
