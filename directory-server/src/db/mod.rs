//! Database Module
//!
//! Owns the embedded SurrealDB connection and the schema definition for
//! the `employee` table. The unique indexes declared here are the final
//! arbiter for the uniqueness invariants: duplicate-insert attempts fail
//! at the storage layer and are classified by index name in the
//! repository layer.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "cidenet";
const DATABASE: &str = "directory";

/// Unique index on `employee.email`
pub const UNIQ_EMPLOYEE_EMAIL: &str = "uniq_employee_email";
/// Unique index on `employee.(id_type, id_number)`
pub const UNIQ_EMPLOYEE_IDENTITY: &str = "uniq_employee_identity";

const SCHEMA: &str = r#"
DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
DEFINE INDEX IF NOT EXISTS uniq_employee_email ON TABLE employee COLUMNS email UNIQUE;
DEFINE INDEX IF NOT EXISTS uniq_employee_identity ON TABLE employee COLUMNS id_type, id_number UNIQUE;
DEFINE INDEX IF NOT EXISTS idx_employee_name ON TABLE employee COLUMNS first_name, first_surname;
"#;

/// Database service - owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database at `db_path`
    pub async fn open(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::prepare(db).await
    }

    /// Open an in-memory database (integration tests)
    #[cfg(feature = "test-support")]
    pub async fn memory() -> Result<Self, AppError> {
        use surrealdb::engine::local::Mem;

        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::prepare(db).await
    }

    /// Select namespace/database and apply the schema definition
    async fn prepare(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(SCHEMA)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?
            .check()
            .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (employee table, uniqueness indexes)");

        Ok(Self { db })
    }
}
