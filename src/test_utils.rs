//! Shared test utilities for `PantryBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test items and callers with sensible defaults.

use crate::{
    core::{
        auth::Identity,
        store::{self, NewEntry},
    },
    entities,
    errors::Result,
    vocabulary::Unit,
};
use sea_orm::DatabaseConnection;
use tracing_subscriber::EnvFilter;

/// Owner id used by store-level tests.
pub const OWNER_A: &str = "owner-a";
/// Second owner id used by store-level tests.
pub const OWNER_B: &str = "owner-b";

/// Installs a test-writer tracing subscriber once; later calls are no-ops.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    init_test_tracing();
    let db = crate::config::database::create_connection("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A caller that owns items in most tests.
#[must_use]
pub fn alice() -> Identity {
    Identity::new("user-alice", "alice@example.com")
}

/// A second caller, used to check owner scoping.
#[must_use]
pub fn bob() -> Identity {
    Identity::new("user-bob", "bob@example.com")
}

/// Creates an undated test item with sensible defaults.
///
/// # Defaults
/// * `quantity`: 1.0
/// * `unit`: count
pub async fn create_test_entry(
    db: &DatabaseConnection,
    owner_id: &str,
    name: &str,
) -> Result<entities::pantry_item::Model> {
    store::create_entry(db, owner_id, NewEntry::new(name, 1.0, Unit::Count)).await
}
