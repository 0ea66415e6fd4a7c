//! Shared types for the storefront
//!
//! Model types and utilities used by both the server and its tests.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
