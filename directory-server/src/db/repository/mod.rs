//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB store.

pub mod employee;

// Re-exports
pub use employee::{
    EmployeeFilter, EmployeeOrder, EmployeeRepository, OrderField, default_ordering,
    parse_ordering,
};

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

use crate::utils::{AppError, FieldError};

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("No unique email candidate available")]
    EmailExhausted,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Validation(errors) => AppError::Validation(errors),
            RepoError::EmailExhausted => AppError::EmailExhausted,
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Which unique index rejected a write
///
/// The storage layer is the final arbiter for both uniqueness invariants;
/// a failed insert is classified here by the index name in the error text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueIndex {
    Email,
    Identity,
}

impl UniqueIndex {
    pub fn from_error(err: &surrealdb::Error) -> Option<Self> {
        let msg = err.to_string();
        if msg.contains(crate::db::UNIQ_EMPLOYEE_EMAIL) {
            Some(UniqueIndex::Email)
        } else if msg.contains(crate::db::UNIQ_EMPLOYEE_IDENTITY) {
            Some(UniqueIndex::Identity)
        } else {
            None
        }
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
