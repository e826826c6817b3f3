//! Entry store - Persistence for pantry items.
//!
//! Every function takes the owner id and filters on it, so one user can never read or
//! change another user's rows. Functions are generic over `ConnectionTrait` so they run
//! against a pooled connection or inside a transaction.

use crate::{
    entities::{PantryItem, pantry_item},
    errors::{Error, Result},
    vocabulary::{DateLabelType, EntryStatus, Unit},
};
use chrono::NaiveDate;
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Field values for a new pantry item, already parsed into domain types.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEntry {
    /// Item name (trimmed on insert)
    pub name: String,
    /// Amount on hand
    pub quantity: f64,
    /// Unit of measure
    pub unit: Unit,
    /// Purchase date
    pub purchase_date: Option<NaiveDate>,
    /// Meaning of `date_on_package`
    pub date_label_type: Option<DateLabelType>,
    /// Date printed on the package
    pub date_on_package: Option<NaiveDate>,
}

impl NewEntry {
    /// Creates an entry with only the required fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            quantity,
            unit,
            purchase_date: None,
            date_label_type: None,
            date_on_package: None,
        }
    }
}

/// Inserts a new `ACTIVE` pantry item for `owner_id`.
///
/// Rejects blank names, blank owners, and quantities that are not finite and positive with
/// [`Error::Validation`] before anything is written.
///
/// # Errors
/// Returns an error if validation fails or the insert fails.
#[instrument(skip(db, entry), fields(name = %entry.name))]
pub async fn create_entry<C>(db: &C, owner_id: &str, entry: NewEntry) -> Result<pantry_item::Model>
where
    C: ConnectionTrait,
{
    if owner_id.trim().is_empty() {
        return Err(Error::Validation {
            message: "owner id cannot be empty".to_string(),
        });
    }

    let name = entry.name.trim();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "name cannot be empty".to_string(),
        });
    }

    if !entry.quantity.is_finite() || entry.quantity <= 0.0 {
        return Err(Error::Validation {
            message: format!("quantity must be greater than zero, got {}", entry.quantity),
        });
    }

    let now = chrono::Utc::now().naive_utc();

    let item = pantry_item::ActiveModel {
        owner_id: Set(owner_id.to_string()),
        name: Set(name.to_string()),
        quantity: Set(entry.quantity),
        unit: Set(entry.unit),
        purchase_date: Set(entry.purchase_date),
        date_label_type: Set(entry.date_label_type),
        date_on_package: Set(entry.date_on_package),
        status: Set(EntryStatus::Active),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = item.insert(db).await?;
    info!(entry_id = created.id, "Created pantry item");
    Ok(created)
}

/// Retrieves all `ACTIVE` items owned by `owner_id`.
///
/// The query orders by package date then newest first, but callers must not rely on it;
/// display order comes from [`crate::core::ordering`].
///
/// # Errors
/// Returns an error if the database query fails.
#[instrument(skip(db))]
pub async fn list_active_entries<C>(db: &C, owner_id: &str) -> Result<Vec<pantry_item::Model>>
where
    C: ConnectionTrait,
{
    let items = PantryItem::find()
        .filter(pantry_item::Column::OwnerId.eq(owner_id))
        .filter(pantry_item::Column::Status.eq(EntryStatus::Active))
        .order_by_asc(pantry_item::Column::DateOnPackage)
        .order_by_desc(pantry_item::Column::CreatedAt)
        .all(db)
        .await?;

    debug!("Fetched {} active pantry items", items.len());
    Ok(items)
}

/// Finds one item owned by `owner_id`, whatever its status.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn find_entry<C>(
    db: &C,
    owner_id: &str,
    entry_id: i64,
) -> Result<Option<pantry_item::Model>>
where
    C: ConnectionTrait,
{
    PantryItem::find_by_id(entry_id)
        .filter(pantry_item::Column::OwnerId.eq(owner_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Marks an item `DISCARDED` if it belongs to `owner_id` and is still `ACTIVE`.
///
/// The check and the write are one `UPDATE ... WHERE id = ? AND owner_id = ? AND
/// status = 'ACTIVE'`, so when several callers race on the same id exactly one of them
/// sees a row affected.
///
/// # Returns
/// `true` if this call performed the transition.
///
/// # Errors
/// Returns an error if the database update fails.
#[instrument(skip(db))]
pub async fn soft_delete_entry<C>(db: &C, owner_id: &str, entry_id: i64) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = PantryItem::update_many()
        .set(pantry_item::ActiveModel {
            status: Set(EntryStatus::Discarded),
            updated_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        })
        .filter(pantry_item::Column::Id.eq(entry_id))
        .filter(pantry_item::Column::OwnerId.eq(owner_id))
        .filter(pantry_item::Column::Status.eq(EntryStatus::Active))
        .exec(db)
        .await?;

    let deleted = result.rows_affected > 0;
    if deleted {
        info!("Soft-deleted pantry item");
    } else {
        debug!("No active pantry item matched for soft delete");
    }
    Ok(deleted)
}
