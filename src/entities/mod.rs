//! Entity module - Contains the SeaORM entity definitions for the database.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod pantry_item;

pub use pantry_item::{
    ActiveModel as PantryItemActiveModel, Column as PantryItemColumn, Entity as PantryItem,
    Model as PantryItemModel,
};
