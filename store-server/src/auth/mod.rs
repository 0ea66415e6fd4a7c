//! Authentication module
//!
//! JWT auth, permissions and middleware:
//! - [`JwtService`] - token service
//! - [`CurrentUser`] - current user context
//! - [`require_auth`] / [`require_permission`] / [`require_admin`] - middleware
//! - [`otp`] - one-time login codes
//! - [`password`] - argon2 hashing for staff accounts

pub mod jwt;
pub mod middleware;
pub mod otp;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth, require_permission};
