//! API layer - HTTP interface for the pantry
//!
//! This module exposes the core operations over axum: routes, handlers, caller resolution
//! from session credentials, and the mapping from [`crate::errors::Error`] to responses.

/// Error to HTTP response mapping
pub mod error;
/// Request handlers
pub mod handlers;
/// Router construction
pub mod routes;
/// Session token extraction and caller resolution
pub mod session;

use crate::core::auth::Authenticator;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Shared data available to all handlers.
/// This structure holds the database connection and the authenticator that
/// every request needs to access.
#[derive(Clone)]
pub struct AppState {
    /// Database connection for all database operations
    pub database: Arc<DatabaseConnection>,
    /// Resolves session tokens to callers
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    /// Creates a new `AppState` from its collaborators.
    /// This is called once by the composition root before the router is built.
    #[must_use]
    pub fn new(
        database: Arc<DatabaseConnection>,
        authenticator: Arc<dyn Authenticator>,
    ) -> Self {
        Self {
            database,
            authenticator,
        }
    }

    /// Borrowed connection, in the shape the service functions take.
    #[must_use]
    pub fn db(&self) -> &DatabaseConnection {
        self.database.as_ref()
    }
}

pub use routes::app_router;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::auth::StaticTokenAuthenticator, errors::Result, test_utils::setup_test_db};

    #[tokio::test]
    async fn test_state_clones_share_connection() -> Result<()> {
        let db = setup_test_db().await?;
        let state = AppState::new(Arc::new(db), Arc::new(StaticTokenAuthenticator::new()));
        let copy = state.clone();

        assert!(Arc::ptr_eq(&state.database, &copy.database));
        copy.db().ping().await?;
        Ok(())
    }
}
