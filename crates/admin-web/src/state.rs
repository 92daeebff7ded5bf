//! Application state shared across handlers.

use database::Database;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Default row count for link listings.
    pub links_page_size: i64,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, links_page_size: i64) -> Self {
        Self {
            db,
            links_page_size,
        }
    }
}
