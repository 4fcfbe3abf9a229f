//! Cidenet Employee Directory Server
//!
//! # Overview
//!
//! Single-entity administrative backend: stores employee records,
//! normalizes and validates their fields, assigns a unique corporate
//! email address on creation and exposes CRUD + filtered listing over
//! an HTTP API.
//!
//! # Module structure
//!
//! ```text
//! directory-server/src/
//! ├── core/          # configuration, state, HTTP server
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # embedded database, models, repositories
//! └── utils/         # errors, logging, time helpers
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use crate::core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};
