//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::config::Config;

/// Shared resources available to every handler.
///
/// Both fields are cheap to clone: `DatabaseConnection` is a pool handle and the
/// configuration sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Settings read from the environment at startup, such as the uploads directory and
    /// the default lesson rate.
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }
}
