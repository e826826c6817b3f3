//! Database configuration module for `PantryBuddy`.
//!
//! This module handles `SQLite` database connection and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the schema always matches the Rust structs. The composite indexes that back the
//! owner-scoped list query and the conditional soft delete are created alongside the table.
//! Every statement is `IF NOT EXISTS`, so startup can run this against an existing file.

use crate::entities::{PantryItem, pantry_item};
use crate::errors::Result;
use sea_orm::sea_query::{Index, IndexCreateStatement};
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};
use std::path::Path;
use tracing::{debug, info, instrument};

const DEFAULT_DATABASE_URL: &str = "sqlite://data/pantry_buddy.sqlite?mode=rwc";

/// Gets the database URL from environment variable or returns default `SQLite` path.
///
/// This function looks for `DATABASE_URL` in the environment and falls back to
/// a default local `SQLite` file if not found.
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Creates the directory a file-backed `SQLite` URL points into, if it is missing.
///
/// Other backends and in-memory URLs are left alone.
pub fn ensure_sqlite_parent_dir(database_url: &str) -> Result<()> {
    let Some(rest) = database_url.strip_prefix("sqlite://") else {
        return Ok(());
    };
    let path = rest.split('?').next().unwrap_or_default();
    if path.is_empty() || path.starts_with(":memory:") {
        return Ok(());
    }

    if let Some(parent) = Path::new(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
    {
        std::fs::create_dir_all(parent)?;
        debug!("Ensured database directory {:?}", parent);
    }
    Ok(())
}

/// Establishes a connection to the database at `database_url`.
///
/// The returned handle is owned by the caller and passed by reference to every store
/// function; dropping it (or calling `close`) tears the pool down.
#[instrument]
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    debug!("Connecting to database");
    Database::connect(database_url).await.map_err(Into::into)
}

/// Index covering the owner-scoped status filter.
fn owner_status_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_pantry_items_owner_status")
        .table(PantryItem)
        .col(pantry_item::Column::OwnerId)
        .col(pantry_item::Column::Status)
        .if_not_exists()
        .to_owned()
}

/// Index covering the owner-scoped list query including its order columns.
fn owner_status_package_date_index() -> IndexCreateStatement {
    Index::create()
        .name("idx_pantry_items_owner_status_package_created")
        .table(PantryItem)
        .col(pantry_item::Column::OwnerId)
        .col(pantry_item::Column::Status)
        .col(pantry_item::Column::DateOnPackage)
        .col(pantry_item::Column::CreatedAt)
        .if_not_exists()
        .to_owned()
}

/// Creates the pantry table and its indexes from the entity definition.
pub async fn create_tables<C>(db: &C) -> Result<()>
where
    C: ConnectionTrait,
{
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut pantry_table = schema.create_table_from_entity(PantryItem);
    pantry_table.if_not_exists();

    db.execute(builder.build(&pantry_table)).await?;
    db.execute(builder.build(&owner_status_index())).await?;
    db.execute(builder.build(&owner_status_package_date_index()))
        .await?;

    info!("Database tables and indexes ensured");
    Ok(())
}
