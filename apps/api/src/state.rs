//! Application state management.
//!
//! Defines the shared application state passed to request handlers.

/// Shared application state.
///
/// Cloned per handler (inexpensive: the database connection is a pool
/// handle), providing access to configuration and the MySQL connection.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MySQL database connection pool
    pub db: database::mysql::DatabaseConnection,
}
