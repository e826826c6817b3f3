//! Domain vocabulary - the closed value sets a pantry item is described with.
//!
//! Stored enumerations derive `DeriveActiveEnum` so the database column can only ever hold a
//! known code. Each enumeration exposes its wire code, a human-readable label, the ordered
//! list of valid values, and a `parse` membership check.

use sea_orm::Iterable;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit of measure for an item's quantity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
pub enum Unit {
    /// Whole items
    #[sea_orm(string_value = "count")]
    #[serde(rename = "count")]
    Count,
    /// Grams
    #[sea_orm(string_value = "g")]
    #[serde(rename = "g")]
    Gram,
    /// Ounces
    #[sea_orm(string_value = "oz")]
    #[serde(rename = "oz")]
    Ounce,
    /// Milliliters
    #[sea_orm(string_value = "ml")]
    #[serde(rename = "ml")]
    Milliliter,
}

impl Unit {
    /// Wire and storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "count",
            Self::Gram => "g",
            Self::Ounce => "oz",
            Self::Milliliter => "ml",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Gram => "Grams",
            Self::Ounce => "Ounces",
            Self::Milliliter => "Milliliters",
        }
    }

    /// All units in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Returns the unit whose code is `code`, if any.
    ///
    /// `parse(code).is_some()` is the membership check for this value set.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::iter().find(|unit| unit.as_str() == code)
    }
}

/// Lifecycle status of a pantry item.
///
/// Only `Active -> Discarded` happens today. `Consumed` is reserved.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryStatus {
    /// In the pantry and listed
    #[sea_orm(string_value = "ACTIVE")]
    Active,
    /// Eaten or used up
    #[sea_orm(string_value = "CONSUMED")]
    Consumed,
    /// Removed by the owner
    #[sea_orm(string_value = "DISCARDED")]
    Discarded,
}

impl EntryStatus {
    /// Wire and storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "ACTIVE",
            Self::Consumed => "CONSUMED",
            Self::Discarded => "DISCARDED",
        }
    }

    /// All statuses.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Returns the status whose code is `code`, if any.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::iter().find(|status| status.as_str() == code)
    }
}

/// What the date printed on a package means.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "snake_case")]
pub enum DateLabelType {
    /// "Best if used by"
    #[sea_orm(string_value = "best_if_used_by")]
    BestIfUsedBy,
    /// "Best before"
    #[sea_orm(string_value = "best_before")]
    BestBefore,
    /// "Use by"
    #[sea_orm(string_value = "use_by")]
    UseBy,
    /// "Sell by"
    #[sea_orm(string_value = "sell_by")]
    SellBy,
    /// "Expiration date"
    #[sea_orm(string_value = "expiration_date")]
    ExpirationDate,
    /// Owner does not know which kind of date it is
    #[sea_orm(string_value = "not_sure")]
    NotSure,
}

impl DateLabelType {
    /// Wire and storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BestIfUsedBy => "best_if_used_by",
            Self::BestBefore => "best_before",
            Self::UseBy => "use_by",
            Self::SellBy => "sell_by",
            Self::ExpirationDate => "expiration_date",
            Self::NotSure => "not_sure",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BestIfUsedBy => "Best if used by",
            Self::BestBefore => "Best before",
            Self::UseBy => "Use by",
            Self::SellBy => "Sell by",
            Self::ExpirationDate => "Expiration date",
            Self::NotSure => "Not sure",
        }
    }

    /// All label types in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Returns the label type whose code is `code`, if any.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::iter().find(|label_type| label_type.as_str() == code)
    }
}

/// How the pantry list is ordered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, EnumIter, Serialize, Deserialize)]
pub enum SortOption {
    /// Latest package date first
    #[default]
    #[serde(rename = "packageDateNewest")]
    PackageDateNewest,
    /// Earliest package date first
    #[serde(rename = "packageDateOldest")]
    PackageDateOldest,
    /// Most recently added first
    #[serde(rename = "addedDateNewest")]
    AddedDateNewest,
    /// Least recently added first
    #[serde(rename = "addedDateOldest")]
    AddedDateOldest,
    /// Name, A to Z
    #[serde(rename = "nameAZ")]
    NameAz,
    /// Name, Z to A
    #[serde(rename = "nameZA")]
    NameZa,
}

impl SortOption {
    /// Option used when a requested option is not recognized.
    pub const FALLBACK: Self = Self::AddedDateNewest;

    /// Wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PackageDateNewest => "packageDateNewest",
            Self::PackageDateOldest => "packageDateOldest",
            Self::AddedDateNewest => "addedDateNewest",
            Self::AddedDateOldest => "addedDateOldest",
            Self::NameAz => "nameAZ",
            Self::NameZa => "nameZA",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PackageDateNewest => "Package date (newest first)",
            Self::PackageDateOldest => "Package date (oldest first)",
            Self::AddedDateNewest => "Date added (newest first)",
            Self::AddedDateOldest => "Date added (oldest first)",
            Self::NameAz => "Name (A-Z)",
            Self::NameZa => "Name (Z-A)",
        }
    }

    /// All sort options in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        Self::iter().collect()
    }

    /// Returns the option whose code is `code`, if any.
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::iter().find(|option| option.as_str() == code)
    }

    /// Resolves a requested option.
    ///
    /// Absent or blank requests get the default; unknown codes get [`Self::FALLBACK`].
    #[must_use]
    pub fn resolve(requested: Option<&str>) -> Self {
        match requested.map(str::trim) {
            None | Some("") => Self::default(),
            Some(code) => Self::parse(code).unwrap_or_else(|| {
                tracing::debug!("Unknown sort option '{}', using fallback", code);
                Self::FALLBACK
            }),
        }
    }
}
