//! Display ordering for pantry items.
//!
//! Items are split into a "dated" section (has a package date) and an "undated" section,
//! then each section is sorted by the selected [`SortOption`]. Sorting is stable, so items
//! that compare equal keep the order they were fetched in. Nothing here touches the database.

use crate::{entities::pantry_item, vocabulary::SortOption};
use serde::Serialize;
use std::cmp::Ordering;

/// Items split into display sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ArrangedEntries {
    /// Items with a package date
    pub dated: Vec<pantry_item::Model>,
    /// Items without a package date
    pub undated: Vec<pantry_item::Model>,
}

impl ArrangedEntries {
    /// Total number of items across both sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dated.len() + self.undated.len()
    }

    /// Whether both sections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dated.is_empty() && self.undated.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortKey {
    PackageDate(Direction),
    CreatedAt(Direction),
    Name(Direction),
}

const fn dated_key(sort: SortOption) -> SortKey {
    match sort {
        SortOption::PackageDateNewest => SortKey::PackageDate(Direction::Descending),
        SortOption::PackageDateOldest => SortKey::PackageDate(Direction::Ascending),
        SortOption::AddedDateNewest => SortKey::CreatedAt(Direction::Descending),
        SortOption::AddedDateOldest => SortKey::CreatedAt(Direction::Ascending),
        SortOption::NameAz => SortKey::Name(Direction::Ascending),
        SortOption::NameZa => SortKey::Name(Direction::Descending),
    }
}

// Undated items have no package date to compare, so those options sort by creation time.
const fn undated_key(sort: SortOption) -> SortKey {
    match dated_key(sort) {
        SortKey::PackageDate(direction) => SortKey::CreatedAt(direction),
        key @ (SortKey::CreatedAt(_) | SortKey::Name(_)) => key,
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

fn compare(a: &pantry_item::Model, b: &pantry_item::Model, key: SortKey) -> Ordering {
    let (ordering, direction) = match key {
        SortKey::PackageDate(direction) => (a.date_on_package.cmp(&b.date_on_package), direction),
        SortKey::CreatedAt(direction) => (a.created_at.cmp(&b.created_at), direction),
        SortKey::Name(direction) => (compare_names(&a.name, &b.name), direction),
    };
    match direction {
        Direction::Ascending => ordering,
        Direction::Descending => ordering.reverse(),
    }
}

/// Splits `entries` into dated and undated sections and sorts each by `sort`.
#[must_use]
pub fn arrange_entries(entries: Vec<pantry_item::Model>, sort: SortOption) -> ArrangedEntries {
    let (mut dated, mut undated): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|entry| entry.date_on_package.is_some());

    let key = dated_key(sort);
    dated.sort_by(|a, b| compare(a, b, key));

    let key = undated_key(sort);
    undated.sort_by(|a, b| compare(a, b, key));

    ArrangedEntries { dated, undated }
}
