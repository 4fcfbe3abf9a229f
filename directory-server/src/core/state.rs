use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::{AppError, AppResult};

/// Server state - shared handles for all request handlers
///
/// `ServerState` is `Clone`; the embedded database handle is itself a cheap
/// shared reference, so every handler gets its own copy.
///
/// | Field | Type | Description |
/// |--------|------|-------------|
/// | config | Config | Immutable configuration |
/// | db | Surreal<Db> | Embedded database |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
}

impl ServerState {
    /// Create server state from already-initialized parts
    pub fn new(config: Config, db: Surreal<Db>) -> Self {
        Self { config, db }
    }

    /// Initialize server state
    ///
    /// 1. Ensure the working directory structure exists
    /// 2. Open the embedded database under `work_dir/database/`
    pub async fn initialize(config: &Config) -> AppResult<Self> {
        config.ensure_work_dir_structure().map_err(|e| {
            AppError::internal(format!("Failed to create work directory structure: {e}"))
        })?;

        let db_path = config.database_dir().join("directory.db");
        let db_service = DbService::open(&db_path.to_string_lossy()).await?;

        Ok(Self::new(config.clone(), db_service.db))
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }
}
