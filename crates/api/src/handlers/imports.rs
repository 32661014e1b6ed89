//! Handlers for bulk CSV import (assets and the location hierarchy).
//!
//! Files arrive as multipart uploads. Header validation happens before any
//! row is processed; rows are then independent, with per-row outcomes
//! accumulated into a summary.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use stocktake_core::import::{
    missing_columns, strip_bom, AssetRow, ImportSummary, LocationRow, ASSET_ERRORS_SURFACED,
};
use stocktake_db::repositories::ImportRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Pull the uploaded CSV file out of the multipart body.
async fn read_csv_upload(multipart: &mut Multipart) -> Result<Vec<u8>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if let Some(filename) = field.file_name() {
            if !filename.ends_with(".csv") {
                return Err(AppError::BadRequest("File must be a CSV".into()));
            }
        }
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        return Ok(data.to_vec());
    }
    Err(AppError::BadRequest("No file part".into()))
}

/// Build a CSV reader over uploaded bytes, tolerating ragged rows.
fn csv_reader(data: &[u8]) -> csv::Reader<&[u8]> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(data)
}

/// Headers as trimmed strings, with a leading BOM stripped.
fn read_headers(reader: &mut csv::Reader<&[u8]>) -> Result<Vec<String>, AppError> {
    let headers = reader
        .headers()
        .map_err(|e| AppError::BadRequest(format!("File processing error: {e}")))?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = if i == 0 { strip_bom(h) } else { h };
            h.trim().to_string()
        })
        .collect())
}

/// Column index lookup by header name.
fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// POST /api/v1/imports/assets
///
/// Import an asset CSV. A missing required column aborts with zero rows
/// processed; everything after that is per-row.
pub async fn import_assets(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let data = read_csv_upload(&mut multipart).await?;
    let mut reader = csv_reader(&data);
    let headers = read_headers(&mut reader)?;

    let missing = missing_columns(&headers);
    if !missing.is_empty() {
        let summary = ImportSummary {
            success: false,
            errors: vec![format!("Missing required columns: {}", missing.join(", "))],
            ..Default::default()
        };
        return Ok(Json(DataResponse { data: summary }));
    }

    let col = |name: &str| column_index(&headers, name).expect("validated above");
    let (item_col, tag_col, model_col, brand_col, serial_col, location_col, cond_col, assignee_col) = (
        col("Item"),
        col("Asset Tag"),
        col("Model"),
        col("Brand"),
        col("Serial Number"),
        col("Location"),
        col("Condition"),
        col("Assignee"),
    );

    let mut rows: Vec<AssetRow> = Vec::new();
    let mut summary = ImportSummary::default();

    // Header row is file line 1; data rows start at 2.
    for (i, record) in reader.records().enumerate() {
        let row_num = i + 2;
        match record {
            Ok(record) => {
                let cell = |idx: usize| record.get(idx).unwrap_or("").to_string();
                rows.push(AssetRow {
                    row_num,
                    item: cell(item_col),
                    asset_tag: cell(tag_col),
                    model: cell(model_col),
                    brand: cell(brand_col),
                    serial_number: cell(serial_col),
                    location: cell(location_col),
                    condition: cell(cond_col),
                    assignee: cell(assignee_col),
                });
            }
            Err(e) => {
                summary.total += 1;
                summary.skipped += 1;
                summary
                    .errors
                    .push(format!("Row {row_num}: Error processing row - {e}"));
            }
        }
    }

    let executed = ImportRepo::import_assets(&state.pool, &rows).await;
    summary.success = executed.success;
    summary.total += executed.total;
    summary.imported = executed.imported;
    summary.skipped += executed.skipped;
    summary.errors.extend(executed.errors);
    summary.bound_errors(ASSET_ERRORS_SURFACED);

    tracing::info!(
        user_id = auth.user_id,
        total = summary.total,
        imported = summary.imported,
        skipped = summary.skipped,
        "Asset CSV uploaded",
    );

    Ok(Json(DataResponse { data: summary }))
}

/// POST /api/v1/imports/locations
///
/// Import a location-hierarchy CSV, resolving or creating the
/// building → floor → room chain per row.
pub async fn import_locations(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let data = read_csv_upload(&mut multipart).await?;
    let mut reader = csv_reader(&data);
    let headers = read_headers(&mut reader)?;

    // Location columns are all optional per row; absent columns read as
    // empty cells.
    let col = |name: &str| column_index(&headers, name);
    let (building_id_col, building_name_col, floor_id_col, floor_name_col, room_id_col, room_name_col) = (
        col("building_id"),
        col("building_name"),
        col("floor_id"),
        col("floor_name"),
        col("room_id"),
        col("room_name"),
    );

    let mut rows: Vec<LocationRow> = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let row_num = i + 2;
        if let Ok(record) = record {
            let cell = |idx: Option<usize>| {
                idx.and_then(|idx| record.get(idx))
                    .unwrap_or("")
                    .to_string()
            };
            rows.push(LocationRow {
                row_num,
                building_id: cell(building_id_col),
                building_name: cell(building_name_col),
                floor_id: cell(floor_id_col),
                floor_name: cell(floor_name_col),
                room_id: cell(room_id_col),
                room_name: cell(room_name_col),
            });
        }
    }

    let summary = ImportRepo::import_locations(&state.pool, &rows).await;

    tracing::info!(
        user_id = auth.user_id,
        buildings = summary.buildings_created,
        floors = summary.floors_created,
        rooms = summary.rooms_created,
        "Location CSV uploaded",
    );

    Ok(Json(DataResponse { data: summary }))
}
