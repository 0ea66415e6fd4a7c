use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::cart::CartStore;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// Server state holding shared references to every service
///
/// Cloning is cheap: every field is either `Copy`-like or behind `Arc`
/// (`SqlitePool` is internally reference-counted).
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
    /// In-memory session carts
    pub cart: Arc<CartStore>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Creates the working directory layout, opens the database (running
    /// migrations) and constructs the services.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        config
            .ensure_work_dir_structure()
            .map_err(|e| AppError::internal(format!("Failed to create work directory: {e}")))?;

        let db_path = config.database_dir().join("storefront.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        Ok(Self {
            config: config.clone(),
            pool: db_service.pool,
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            cart: Arc::new(CartStore::new()),
        })
    }

    /// Build a state around an existing pool (tests)
    pub fn with_pool(config: Config, pool: SqlitePool) -> Self {
        let jwt = JwtService::with_config(config.jwt.clone());
        Self {
            config,
            pool,
            jwt_service: Arc::new(jwt),
            cart: Arc::new(CartStore::new()),
        }
    }
}
