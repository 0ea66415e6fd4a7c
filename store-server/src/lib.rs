//! Storefront server - server-rendered shop backend
//!
//! # Overview
//!
//! HTTP API for a small e-commerce storefront:
//!
//! - **Catalog** (`api/products`, `api/categories`, `api/brands`): browsing and management
//! - **Pricing** (`pricing`): discount baskets, best-discount-wins quotes
//! - **Cart** (`cart`): in-memory session carts with frozen price snapshots
//! - **Orders** (`orders`): checkout materialization and a validated status graph
//! - **Auth** (`auth`): phone + OTP for customers, phone + password for staff, JWT throughout
//! - **Ancillary**: blog, search, wishlist, comments, sliders and banners
//!
//! # Module structure
//!
//! ```text
//! store-server/src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT, OTP, passwords, middleware
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # SQLite pool and repositories
//! ├── pricing/       # discount calculator
//! ├── cart/          # session cart store
//! ├── orders/        # checkout and status transitions
//! └── utils/         # errors, logging
//! ```

pub mod api;
pub mod auth;
pub mod cart;
pub mod core;
pub mod db;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
    ($level:expr, $event:expr) => {
        tracing::info!(target: "security", level = $level, event = $event);
    };
}

pub fn print_banner() {
    println!(
        r#"
   _____ __                  ____                 __
  / ___// /_____  ________  / __/________  ____  / /_
  \__ \/ __/ __ \/ ___/ _ \/ /_/ ___/ __ \/ __ \/ __/
 ___/ / /_/ /_/ / /  /  __/ __/ /  / /_/ / / / / /_
/____/\__/\____/_/   \___/_/ /_/   \____/_/ /_/\__/
    "#
    );
}

/// Load `.env`, create the working directory layout and start logging
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let config = Config::from_env();
    config.ensure_work_dir_structure()?;

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = config.log_dir();
    init_logger_with_file(log_level.as_deref(), log_dir.to_str());

    Ok(())
}
