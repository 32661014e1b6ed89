//! CSV import domain types and validation.
//!
//! The HTTP layer parses uploaded CSV bytes into the row structs defined
//! here; the persistence layer consumes them and reports one tagged
//! [`RowOutcome`] per row. Keeping the outcome a variant (instead of
//! string-matching in control flow) is what lets the importer distinguish
//! "created", "created but redirected to the UNKNOWN room", and "skipped"
//! without inspecting error text.

use serde::Serialize;

use crate::status::AssetStatus;

/// Columns an asset CSV must carry, validated before any row is processed.
pub const ASSET_REQUIRED_COLUMNS: &[&str] = &[
    "Item",
    "Asset Tag",
    "Model",
    "Brand",
    "Serial Number",
    "Location",
    "Condition",
    "Assignee",
];

/// Maximum per-row error strings surfaced to an HTTP caller for asset
/// imports.
pub const ASSET_ERRORS_SURFACED: usize = 50;

/// Maximum per-row error strings surfaced to an HTTP caller for location
/// imports.
pub const LOCATION_ERRORS_SURFACED: usize = 10;

/// Strip a UTF-8 byte-order mark from the first header cell, if present.
/// Spreadsheet exports routinely prefix one.
pub fn strip_bom(s: &str) -> &str {
    s.strip_prefix('\u{feff}').unwrap_or(s)
}

/// Return the required columns absent from the given (trimmed) header row.
pub fn missing_columns(headers: &[String]) -> Vec<&'static str> {
    ASSET_REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .copied()
        .collect()
}

/// One parsed asset CSV row. All fields are trimmed; `row_num` is the
/// 1-based file line (header = line 1, first data row = 2).
#[derive(Debug, Clone)]
pub struct AssetRow {
    pub row_num: usize,
    pub item: String,
    pub asset_tag: String,
    pub model: String,
    pub brand: String,
    pub serial_number: String,
    pub location: String,
    pub condition: String,
    pub assignee: String,
}

impl AssetRow {
    /// Field-level validation performed before any database work.
    pub fn validate(&self) -> Result<(), String> {
        if self.asset_tag.is_empty() {
            return Err(format!("Row {}: Missing Asset Tag (required)", self.row_num));
        }
        if self.item.is_empty() {
            return Err(format!(
                "Row {}: Missing Item description (required)",
                self.row_num
            ));
        }
        Ok(())
    }
}

/// A Condition cell may carry a sticky status override. Only the sticky
/// states are honored; the derivable statuses and unrecognized values leave
/// the derived status untouched.
pub fn condition_override(condition: &str) -> Option<AssetStatus> {
    match condition {
        "Missing" => Some(AssetStatus::Missing),
        "Lost" => Some(AssetStatus::Lost),
        _ => None,
    }
}

/// Outcome of importing a single asset row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    /// Row imported into its requested room.
    Created,
    /// Row imported, but its location did not resolve and the asset was
    /// redirected to the UNKNOWN sentinel room.
    Redirected { reason: String },
    /// Row not imported.
    Skipped { reason: String },
}

/// Aggregate result of an asset CSV import.
#[derive(Debug, Default, Serialize)]
pub struct ImportSummary {
    pub success: bool,
    pub total: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Fold one row outcome into the summary.
    pub fn record(&mut self, outcome: RowOutcome) {
        self.total += 1;
        match outcome {
            RowOutcome::Created => self.imported += 1,
            RowOutcome::Redirected { reason } => {
                self.imported += 1;
                self.errors.push(reason);
            }
            RowOutcome::Skipped { reason } => {
                self.skipped += 1;
                self.errors.push(reason);
            }
        }
        self.success = self.imported > 0;
    }

    /// Truncate the error list for HTTP surfacing, noting how many were cut.
    pub fn bound_errors(&mut self, limit: usize) {
        if self.errors.len() > limit {
            let hidden = self.errors.len() - limit;
            self.errors.truncate(limit);
            self.errors.push(format!("... and {hidden} more errors"));
        }
    }
}

/// One parsed location-hierarchy CSV row. Empty cells are empty strings;
/// a row may describe only a building, a building + floor, or the full
/// chain down to a room.
#[derive(Debug, Clone)]
pub struct LocationRow {
    pub row_num: usize,
    pub building_id: String,
    pub building_name: String,
    pub floor_id: String,
    pub floor_name: String,
    pub room_id: String,
    pub room_name: String,
}

/// Aggregate result of a location-hierarchy CSV import.
#[derive(Debug, Default, Serialize)]
pub struct LocationImportSummary {
    pub success: bool,
    pub message: String,
    pub buildings_created: usize,
    pub floors_created: usize,
    pub rooms_created: usize,
    pub skipped_rows: usize,
    pub errors: Vec<String>,
}

impl LocationImportSummary {
    /// Finalize the success flag and human-readable message.
    pub fn finalize(&mut self) {
        self.success =
            self.buildings_created > 0 || self.floors_created > 0 || self.rooms_created > 0;
        self.message = format!(
            "Successfully imported {} buildings, {} floors, and {} rooms. {} rows skipped.",
            self.buildings_created, self.floors_created, self.rooms_created, self.skipped_rows
        );
        if self.errors.len() > LOCATION_ERRORS_SURFACED {
            self.message.push_str(&format!(
                " Showing first {} of {} errors.",
                LOCATION_ERRORS_SURFACED,
                self.errors.len()
            ));
            self.errors.truncate(LOCATION_ERRORS_SURFACED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cols: &[&str]) -> Vec<String> {
        cols.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn complete_headers_pass() {
        assert!(missing_columns(&headers(ASSET_REQUIRED_COLUMNS)).is_empty());
    }

    #[test]
    fn missing_serial_number_is_reported() {
        let cols = headers(&[
            "Item",
            "Asset Tag",
            "Model",
            "Brand",
            "Location",
            "Condition",
            "Assignee",
        ]);
        assert_eq!(missing_columns(&cols), vec!["Serial Number"]);
    }

    #[test]
    fn bom_is_stripped_from_first_header() {
        assert_eq!(strip_bom("\u{feff}Item"), "Item");
        assert_eq!(strip_bom("Item"), "Item");
    }

    #[test]
    fn row_requires_tag_and_item() {
        let mut row = AssetRow {
            row_num: 2,
            item: "Laptop".into(),
            asset_tag: "A001".into(),
            model: String::new(),
            brand: String::new(),
            serial_number: String::new(),
            location: String::new(),
            condition: String::new(),
            assignee: String::new(),
        };
        assert!(row.validate().is_ok());

        row.asset_tag.clear();
        assert!(row.validate().unwrap_err().contains("Missing Asset Tag"));

        row.asset_tag = "A001".into();
        row.item.clear();
        assert!(row.validate().unwrap_err().contains("Missing Item"));
    }

    #[test]
    fn only_sticky_conditions_override() {
        assert_eq!(condition_override("Missing"), Some(AssetStatus::Missing));
        assert_eq!(condition_override("Lost"), Some(AssetStatus::Lost));
        assert_eq!(condition_override("Good"), None);
        assert_eq!(condition_override("Misplaced"), None);
        assert_eq!(condition_override("Found"), None);
        assert_eq!(condition_override("Unassigned"), None);
        assert_eq!(condition_override("Pristine"), None);
    }

    #[test]
    fn summary_counts_and_bounds_errors() {
        let mut summary = ImportSummary::default();
        summary.record(RowOutcome::Created);
        summary.record(RowOutcome::Redirected {
            reason: "Row 3: Location 'X' not found, assigned to Unknown Room".into(),
        });
        summary.record(RowOutcome::Skipped {
            reason: "Row 4: Missing Asset Tag (required)".into(),
        });

        assert!(summary.success);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.imported, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors.len(), 2);

        for i in 0..10 {
            summary.record(RowOutcome::Skipped {
                reason: format!("Row {}: boom", i + 5),
            });
        }
        summary.bound_errors(5);
        assert_eq!(summary.errors.len(), 6);
        assert!(summary.errors.last().unwrap().contains("more errors"));
    }

    #[test]
    fn location_summary_message_reflects_counts() {
        let mut summary = LocationImportSummary {
            buildings_created: 1,
            floors_created: 2,
            rooms_created: 3,
            skipped_rows: 1,
            ..Default::default()
        };
        summary.finalize();
        assert!(summary.success);
        assert!(summary.message.contains("1 buildings, 2 floors, and 3 rooms"));
        assert!(summary.message.contains("1 rows skipped"));
    }
}
