//! Entry service - Request-level validation in front of the entry store.
//!
//! Raw requests arrive as loosely-typed input. This module checks the caller, validates the
//! required fields, quietly drops optional dates it cannot read, and hands typed values to
//! [`crate::core::store`]. It is also the only place that turns "no row affected" into
//! [`Error::NotFound`].

use crate::{
    core::{
        auth::Identity,
        ordering::{ArrangedEntries, arrange_entries},
        store::{self, NewEntry},
    },
    entities::pantry_item,
    errors::{Error, InputField, Result},
    vocabulary::{DateLabelType, SortOption, Unit},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use sea_orm::ConnectionTrait;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

/// Quantity as sent by a client: a JSON number or a numeric string.
///
/// Any other JSON value is kept as [`RawQuantity::Other`] so it is rejected as a quantity
/// error rather than as an unreadable body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    /// `"quantity": 2.5`
    Number(f64),
    /// `"quantity": "2.5"`
    Text(String),
    /// `"quantity": true`, `{}`, ...
    Other(serde_json::Value),
}

/// A text field as sent by a client. Non-string JSON values land in [`RawText::Other`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    /// A JSON string
    Text(String),
    /// Anything else
    Other(serde_json::Value),
}

impl RawText {
    /// The string content, if the client sent a string.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Other(_) => None,
        }
    }
}

impl From<&str> for RawText {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Unvalidated create request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEntryInput {
    /// Item name
    pub name: Option<RawText>,
    /// Amount on hand
    pub quantity: Option<RawQuantity>,
    /// Unit code
    pub unit: Option<RawText>,
    /// Purchase date text
    pub purchase_date: Option<RawText>,
    /// Date label code
    pub date_label_type: Option<RawText>,
    /// Package date text
    pub date_on_package: Option<RawText>,
}

fn require_caller(caller: Option<&Identity>) -> Result<&Identity> {
    caller.ok_or(Error::Unauthorized)
}

fn parse_quantity(raw: Option<&RawQuantity>) -> Result<f64> {
    let quantity = match raw {
        None => return Err(Error::invalid(InputField::Quantity, "quantity required")),
        Some(RawQuantity::Number(n)) => *n,
        Some(RawQuantity::Text(text)) => text.trim().parse::<f64>().map_err(|_| {
            Error::invalid(InputField::Quantity, format!("'{text}' is not a number"))
        })?,
        Some(RawQuantity::Other(value)) => {
            return Err(Error::invalid(
                InputField::Quantity,
                format!("{value} is not a number"),
            ));
        }
    };

    if !quantity.is_finite() || quantity <= 0.0 {
        return Err(Error::invalid(
            InputField::Quantity,
            "quantity must be a number greater than zero",
        ));
    }
    Ok(quantity)
}

fn parse_unit(raw: Option<&RawText>) -> Result<Unit> {
    raw.and_then(RawText::as_text)
        .map(str::trim)
        .and_then(Unit::parse)
        .ok_or_else(|| {
            let valid: Vec<&str> = Unit::all().into_iter().map(Unit::as_str).collect();
            Error::invalid(
                InputField::Unit,
                format!("unit must be one of: {}", valid.join(", ")),
            )
        })
}

fn parse_date_label_type(raw: Option<&RawText>) -> Result<Option<DateLabelType>> {
    let code = match raw {
        None => return Ok(None),
        Some(RawText::Text(text)) => text.trim(),
        Some(RawText::Other(value)) => {
            return Err(Error::invalid(
                InputField::DateLabelType,
                format!("{value} is not a known date label"),
            ));
        }
    };

    if code.is_empty() {
        return Ok(None);
    }
    DateLabelType::parse(code).map(Some).ok_or_else(|| {
        Error::invalid(
            InputField::DateLabelType,
            format!("'{code}' is not a known date label"),
        )
    })
}

fn optional_text(raw: Option<&RawText>) -> Option<&str> {
    raw.and_then(RawText::as_text)
}

/// Reads an optional date, returning `None` for blank or unreadable input.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and `YYYY-MM-DDTHH:MM[:SS]`; for timestamps
/// only the calendar date is kept.
#[must_use]
pub fn normalize_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = raw.map(str::trim).filter(|t| !t.is_empty())?;

    let parsed = NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.date_naive())
        })
        .or_else(|| {
            NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M"))
                .ok()
                .map(|dt| dt.date())
        });

    if parsed.is_none() {
        debug!("Dropping unreadable date '{}'", text);
    }
    parsed
}

/// Validates a raw create request into typed fields.
///
/// # Errors
/// Returns [`Error::InvalidInput`] naming the first field that fails, checked in the
/// order name, quantity, unit, date label.
pub fn validate_new_entry(input: &RawEntryInput) -> Result<NewEntry> {
    let name = optional_text(input.name.as_ref())
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::invalid(InputField::Name, "name required"))?;

    let quantity = parse_quantity(input.quantity.as_ref())?;
    let unit = parse_unit(input.unit.as_ref())?;
    let date_label_type = parse_date_label_type(input.date_label_type.as_ref())?;

    Ok(NewEntry {
        name: name.to_string(),
        quantity,
        unit,
        purchase_date: normalize_date(optional_text(input.purchase_date.as_ref())),
        date_label_type,
        date_on_package: normalize_date(optional_text(input.date_on_package.as_ref())),
    })
}

/// Validates `input` and stores it as a new item owned by `caller`.
///
/// # Errors
/// - [`Error::Unauthorized`] when `caller` is `None`
/// - [`Error::InvalidInput`] when a field fails validation
/// - [`Error::Validation`] or [`Error::Database`] from the store
#[instrument(skip(db, caller, input))]
pub async fn submit_new_entry<C>(
    db: &C,
    caller: Option<&Identity>,
    input: RawEntryInput,
) -> Result<pantry_item::Model>
where
    C: ConnectionTrait,
{
    let identity = require_caller(caller)?;
    let entry = validate_new_entry(&input).inspect_err(|e| debug!("Rejected new item: {}", e))?;
    store::create_entry(db, &identity.user_id, entry).await
}

/// Lists the caller's active items in store order.
///
/// # Errors
/// Returns [`Error::Unauthorized`] when `caller` is `None`, or a database error.
pub async fn list_entries<C>(db: &C, caller: Option<&Identity>) -> Result<Vec<pantry_item::Model>>
where
    C: ConnectionTrait,
{
    let identity = require_caller(caller)?;
    store::list_active_entries(db, &identity.user_id).await
}

/// Lists the caller's active items split into display sections.
///
/// # Errors
/// Returns [`Error::Unauthorized`] when `caller` is `None`, or a database error.
pub async fn list_arranged_entries<C>(
    db: &C,
    caller: Option<&Identity>,
    sort: SortOption,
) -> Result<ArrangedEntries>
where
    C: ConnectionTrait,
{
    let entries = list_entries(db, caller).await?;
    Ok(arrange_entries(entries, sort))
}

/// Discards one of the caller's active items.
///
/// # Errors
/// - [`Error::Unauthorized`] when `caller` is `None`
/// - [`Error::NotFound`] when no active item with this id belongs to the caller
#[instrument(skip(db, caller))]
pub async fn remove_entry<C>(db: &C, caller: Option<&Identity>, entry_id: i64) -> Result<()>
where
    C: ConnectionTrait,
{
    let identity = require_caller(caller)?;
    if store::soft_delete_entry(db, &identity.user_id, entry_id).await? {
        Ok(())
    } else {
        warn!(user_id = %identity.user_id, "Remove requested for unknown or inactive item");
        Err(Error::NotFound { entry_id })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    #![allow(clippy::panic)]
    use super::*;
    use crate::test_utils::*;
    use crate::vocabulary::EntryStatus;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use serde_json::json;

    fn raw(name: &str, quantity: RawQuantity, unit: &str) -> RawEntryInput {
        RawEntryInput {
            name: Some(name.into()),
            quantity: Some(quantity),
            unit: Some(unit.into()),
            ..Default::default()
        }
    }

    fn assert_invalid(result: Result<pantry_item::Model>, expected: InputField) {
        match result {
            Err(Error::InvalidInput { field, .. }) => assert_eq!(field, expected),
            other => panic!("expected invalid {expected}, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_submit_requires_caller() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let result = submit_new_entry(&db, None, raw("Rice", RawQuantity::Number(1.0), "g")).await;
        assert!(matches!(result, Err(Error::Unauthorized)));
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_quantities() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let caller = alice();

        for quantity in [
            RawQuantity::Number(0.0),
            RawQuantity::Number(-3.0),
            RawQuantity::Text("abc".to_string()),
            RawQuantity::Text("NaN".to_string()),
            RawQuantity::Text("inf".to_string()),
            RawQuantity::Text(String::new()),
        ] {
            let result = submit_new_entry(&db, Some(&caller), raw("Rice", quantity, "g")).await;
            assert_invalid(result, InputField::Quantity);
        }

        let mut missing = raw("Rice", RawQuantity::Number(1.0), "g");
        missing.quantity = None;
        assert_invalid(
            submit_new_entry(&db, Some(&caller), missing).await,
            InputField::Quantity,
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_rejects_bad_name_unit_and_label() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        let caller = alice();

        let result =
            submit_new_entry(&db, Some(&caller), raw("   ", RawQuantity::Number(1.0), "g")).await;
        assert_invalid(result, InputField::Name);

        let result =
            submit_new_entry(&db, Some(&caller), raw("Rice", RawQuantity::Number(1.0), "kg"))
                .await;
        assert_invalid(result, InputField::Unit);

        let mut input = raw("Rice", RawQuantity::Number(1.0), "g");
        input.date_label_type = Some("eat_soon".into());
        assert_invalid(
            submit_new_entry(&db, Some(&caller), input).await,
            InputField::DateLabelType,
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_submit_valid_entry() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();

        let mut input = raw("  Flour ", RawQuantity::Text("2.5".to_string()), "g");
        input.date_label_type = Some("".into());
        let item = submit_new_entry(&db, Some(&caller), input).await?;

        assert_eq!(item.name, "Flour");
        assert_eq!(item.quantity, 2.5);
        assert_eq!(item.unit, Unit::Gram);
        assert_eq!(item.status, EntryStatus::Active);
        assert_eq!(item.owner_id, caller.user_id);
        assert!(item.date_label_type.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_dates_are_dropped() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();

        let mut input = raw("Soup", RawQuantity::Number(2.0), "count");
        input.date_on_package = Some("not-a-date".into());
        input.purchase_date = Some("2025-02-30".into());
        let item = submit_new_entry(&db, Some(&caller), input).await?;

        assert!(item.date_on_package.is_none());
        assert!(item.purchase_date.is_none());
        Ok(())
    }

    fn from_json(value: serde_json::Value) -> RawEntryInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_wrong_json_types_reach_validation() {
        let base = json!({ "name": "Rice", "quantity": 1, "unit": "g" });

        for quantity in [json!(true), json!({}), json!([1])] {
            let mut body = base.clone();
            body["quantity"] = quantity;
            let input = from_json(body);
            assert!(matches!(input.quantity, Some(RawQuantity::Other(_))));
            assert!(matches!(
                validate_new_entry(&input),
                Err(Error::InvalidInput { field: InputField::Quantity, .. })
            ));
        }

        let mut body = base.clone();
        body["unit"] = json!(5);
        assert!(matches!(
            validate_new_entry(&from_json(body)),
            Err(Error::InvalidInput { field: InputField::Unit, .. })
        ));

        let mut body = base.clone();
        body["name"] = json!(42);
        assert!(matches!(
            validate_new_entry(&from_json(body)),
            Err(Error::InvalidInput { field: InputField::Name, .. })
        ));

        let mut body = base.clone();
        body["dateLabelType"] = json!(3);
        assert!(matches!(
            validate_new_entry(&from_json(body)),
            Err(Error::InvalidInput { field: InputField::DateLabelType, .. })
        ));
    }

    #[test]
    fn test_non_string_dates_are_dropped() -> Result<()> {
        let input = from_json(json!({
            "name": "Oats",
            "quantity": "3",
            "unit": "count",
            "dateOnPackage": 20_250_101,
            "purchaseDate": { "day": 1 },
            "dateLabelType": null
        }));
        let entry = validate_new_entry(&input)?;

        assert!(entry.date_on_package.is_none());
        assert!(entry.purchase_date.is_none());
        assert!(entry.date_label_type.is_none());
        assert_eq!(entry.quantity, 3.0);
        Ok(())
    }

    #[test]
    fn test_normalize_date_shapes() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 14);
        assert_eq!(normalize_date(Some("2025-06-14")), expected);
        assert_eq!(normalize_date(Some(" 2025-06-14 ")), expected);
        assert_eq!(normalize_date(Some("2025-06-14T08:30:00Z")), expected);
        assert_eq!(normalize_date(Some("2025-06-14T08:30:00+02:00")), expected);
        assert_eq!(normalize_date(Some("2025-06-14T08:30")), expected);
        assert_eq!(normalize_date(Some("")), None);
        assert_eq!(normalize_date(None), None);
        assert_eq!(normalize_date(Some("14/06/2025")), None);
    }

    #[tokio::test]
    async fn test_round_trip_all_optional_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();

        let input = RawEntryInput {
            name: Some("Tomato paste".into()),
            quantity: Some(RawQuantity::Number(170.0)),
            unit: Some("g".into()),
            purchase_date: Some("2025-05-01".into()),
            date_label_type: Some("best_before".into()),
            date_on_package: Some("2026-01-31".into()),
        };
        let created = submit_new_entry(&db, Some(&caller), input).await?;

        let listed = list_entries(&db, Some(&caller)).await?;
        assert_eq!(listed.len(), 1);
        let fetched = &listed[0];
        assert_eq!(fetched, &created);
        assert_eq!(fetched.name, "Tomato paste");
        assert_eq!(fetched.quantity, 170.0);
        assert_eq!(fetched.unit, Unit::Gram);
        assert_eq!(fetched.date_label_type, Some(DateLabelType::BestBefore));
        assert_eq!(fetched.date_on_package, NaiveDate::from_ymd_opt(2026, 1, 31));
        assert_eq!(fetched.purchase_date, NaiveDate::from_ymd_opt(2025, 5, 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_twice_reports_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();
        let item = create_test_entry(&db, &caller.user_id, "Crackers").await?;

        remove_entry(&db, Some(&caller), item.id).await?;
        let second = remove_entry(&db, Some(&caller), item.id).await;
        assert!(matches!(second, Err(Error::NotFound { entry_id }) if entry_id == item.id));

        let stored = store::find_entry(&db, &caller.user_id, item.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, EntryStatus::Discarded);
        assert!(list_entries(&db, Some(&caller)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_removes_single_success() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();
        let item = create_test_entry(&db, &caller.user_id, "Pasta").await?;

        let (first, second, third) = tokio::join!(
            remove_entry(&db, Some(&caller), item.id),
            remove_entry(&db, Some(&caller), item.id),
            remove_entry(&db, Some(&caller), item.id),
        );
        let outcomes = [first, second, third];

        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        let not_found = outcomes
            .iter()
            .filter(|r| matches!(r, Err(Error::NotFound { .. })))
            .count();
        assert_eq!(successes, 1);
        assert_eq!(not_found, 2);

        let stored = store::find_entry(&db, &caller.user_id, item.id)
            .await?
            .unwrap();
        assert_eq!(stored.status, EntryStatus::Discarded);
        Ok(())
    }

    #[tokio::test]
    async fn test_remove_foreign_entry_is_not_found() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = alice();
        let intruder = bob();
        let item = create_test_entry(&db, &owner.user_id, "Honey").await?;

        let result = remove_entry(&db, Some(&intruder), item.id).await;
        assert!(matches!(result, Err(Error::NotFound { .. })));

        let missing = remove_entry(&db, Some(&intruder), 4242).await;
        assert_eq!(
            result.unwrap_err().to_string(),
            missing.unwrap_err().to_string()
        );

        assert_eq!(list_entries(&db, Some(&owner)).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_and_remove_require_caller() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();
        assert!(matches!(
            list_entries(&db, None).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            remove_entry(&db, None, 1).await,
            Err(Error::Unauthorized)
        ));
        assert!(matches!(
            list_arranged_entries(&db, None, SortOption::default()).await,
            Err(Error::Unauthorized)
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_arranged_entries() -> Result<()> {
        let db = setup_test_db().await?;
        let caller = alice();

        let mut later = raw("Beans", RawQuantity::Number(1.0), "count");
        later.date_on_package = Some("2025-04-10".into());
        let later = submit_new_entry(&db, Some(&caller), later).await?;

        let mut sooner = raw("Corn", RawQuantity::Number(1.0), "count");
        sooner.date_on_package = Some("2025-04-05".into());
        let sooner = submit_new_entry(&db, Some(&caller), sooner).await?;

        let loose = submit_new_entry(
            &db,
            Some(&caller),
            raw("Garlic", RawQuantity::Number(3.0), "count"),
        )
        .await?;

        let arranged =
            list_arranged_entries(&db, Some(&caller), SortOption::PackageDateOldest).await?;
        let dated: Vec<i64> = arranged.dated.iter().map(|i| i.id).collect();
        assert_eq!(dated, vec![sooner.id, later.id]);
        assert_eq!(arranged.undated.len(), 1);
        assert_eq!(arranged.undated[0].id, loose.id);
        Ok(())
    }
}
