//! HTTP handlers for the pantry endpoints.
//!
//! Handlers only unpack the request, resolve the caller, and call into
//! [`crate::core::service`]. All validation and ownership rules live there.

use super::{AppState, session::Caller};
use crate::{
    core::{
        ordering::ArrangedEntries,
        service::{self, RawEntryInput},
    },
    entities::pantry_item,
    errors::{Error, Result},
    vocabulary::{DateLabelType, SortOption, Unit},
};
use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// Body of `GET /api/pantry`.
#[derive(Debug, Serialize)]
pub struct ItemsResponse {
    /// Active items in store order
    pub items: Vec<pantry_item::Model>,
}

/// Query string of `GET /api/pantry/sections`.
#[derive(Debug, Default, Deserialize)]
pub struct SectionsQuery {
    /// Requested sort option code
    pub sort: Option<String>,
}

/// Body of `GET /api/pantry/sections`.
#[derive(Debug, Serialize)]
pub struct SectionsResponse {
    /// Sort option actually applied
    pub sort: SortOption,
    /// Dated and undated sections
    #[serde(flatten)]
    pub sections: ArrangedEntries,
}

/// One selectable value with its label.
#[derive(Debug, Serialize)]
pub struct VocabularyEntry {
    /// Wire code
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Body of `GET /api/vocabulary`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyResponse {
    /// Units of measure
    pub units: Vec<VocabularyEntry>,
    /// Package date meanings
    pub date_label_types: Vec<VocabularyEntry>,
    /// Display sort options
    pub sort_options: Vec<VocabularyEntry>,
    /// Sort option used when none is requested
    pub default_sort: SortOption,
}

/// `GET /api/pantry` - the caller's active items.
pub async fn list_items(
    State(state): State<AppState>,
    caller: Caller,
) -> Result<Json<ItemsResponse>> {
    let items = service::list_entries(state.db(), caller.identity()).await?;
    Ok(Json(ItemsResponse { items }))
}

/// `GET /api/pantry/sections?sort=` - the caller's active items arranged for display.
pub async fn list_sections(
    State(state): State<AppState>,
    caller: Caller,
    Query(query): Query<SectionsQuery>,
) -> Result<Json<SectionsResponse>> {
    let sort = SortOption::resolve(query.sort.as_deref());
    let sections = service::list_arranged_entries(state.db(), caller.identity(), sort).await?;
    Ok(Json(SectionsResponse { sort, sections }))
}

/// `POST /api/pantry` - add an item.
///
/// A body that is not a JSON object is answered with the usual JSON error body; field-level
/// type mismatches reach the service and are reported per field.
pub async fn create_item(
    State(state): State<AppState>,
    caller: Caller,
    payload: std::result::Result<Json<RawEntryInput>, JsonRejection>,
) -> Result<impl IntoResponse> {
    let input = match payload {
        Ok(Json(input)) => input,
        Err(_) if caller.identity().is_none() => return Err(Error::Unauthorized),
        Err(rejection) => return Err(rejection.into()),
    };
    let item = service::submit_new_entry(state.db(), caller.identity(), input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// `DELETE /api/pantry/:id` - discard an item.
pub async fn delete_item(
    State(state): State<AppState>,
    caller: Caller,
    Path(entry_id): Path<i64>,
) -> Result<StatusCode> {
    service::remove_entry(state.db(), caller.identity(), entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/vocabulary` - values and labels for client pickers.
pub async fn vocabulary() -> Json<VocabularyResponse> {
    Json(VocabularyResponse {
        units: Unit::all()
            .into_iter()
            .map(|unit| VocabularyEntry {
                value: unit.as_str(),
                label: unit.label(),
            })
            .collect(),
        date_label_types: DateLabelType::all()
            .into_iter()
            .map(|label_type| VocabularyEntry {
                value: label_type.as_str(),
                label: label_type.label(),
            })
            .collect(),
        sort_options: SortOption::all()
            .into_iter()
            .map(|option| VocabularyEntry {
                value: option.as_str(),
                label: option.label(),
            })
            .collect(),
        default_sort: SortOption::default(),
    })
}

/// `GET /health` - liveness plus a database ping.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    match state.db().ping().await {
        Ok(()) => (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))),
        Err(e) => {
            error!("Health check database ping failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(serde_json::json!({ "status": "unavailable" })),
            )
        }
    }
}

/// Fallback for unknown routes.
pub async fn not_found() -> impl IntoResponse {
    debug!("Request for unknown route");
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not found" })),
    )
}
