//! Pantry item entity - One food item a user keeps track of.
//!
//! Items are scoped to an `owner_id` and are never physically deleted; removing an item
//! moves its `status` from `ACTIVE` to `DISCARDED`.

use crate::vocabulary::{DateLabelType, EntryStatus, Unit};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pantry item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pantry_items")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Identifier of the user who owns the item
    pub owner_id: String,
    /// Trimmed, non-empty item name
    pub name: String,
    /// Amount on hand, always greater than zero
    pub quantity: f64,
    /// Unit the quantity is measured in
    pub unit: Unit,
    /// When the item was bought
    pub purchase_date: Option<Date>,
    /// What `date_on_package` means
    pub date_label_type: Option<DateLabelType>,
    /// Date printed on the package
    pub date_on_package: Option<Date>,
    /// Lifecycle status
    pub status: EntryStatus,
    /// When the item was created
    pub created_at: DateTime,
    /// When the item was last modified
    pub updated_at: DateTime,
}

/// `PantryItem` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
