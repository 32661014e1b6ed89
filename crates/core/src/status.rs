//! Asset status engine.
//!
//! Status is a pure function of the asset's location facts plus the sticky
//! lifecycle overrides (Lost, Missing). Nothing outside this module decides
//! a status transition; the repositories apply the decisions made here
//! inside their transactions.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// The status of a tracked asset.
///
/// `Good` and `Misplaced` are derived from comparing the assigned room with
/// the last observed room. `Lost` and `Missing` are sticky overrides set by
/// lifecycle actions and cleared only by a found/relocate action.
/// `Unassigned` marks an asset whose real room could not be resolved at
/// creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssetStatus {
    Good,
    Misplaced,
    Missing,
    Lost,
    Found,
    Unassigned,
}

impl AssetStatus {
    /// Canonical string form as stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Good => "Good",
            AssetStatus::Misplaced => "Misplaced",
            AssetStatus::Missing => "Missing",
            AssetStatus::Lost => "Lost",
            AssetStatus::Found => "Found",
            AssetStatus::Unassigned => "Unassigned",
        }
    }

    /// Parse a stored status string. Returns `None` for unknown values.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Good" => Some(AssetStatus::Good),
            "Misplaced" => Some(AssetStatus::Misplaced),
            "Missing" => Some(AssetStatus::Missing),
            "Lost" => Some(AssetStatus::Lost),
            "Found" => Some(AssetStatus::Found),
            "Unassigned" => Some(AssetStatus::Unassigned),
            _ => None,
        }
    }
}

impl std::fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derive the location-based status: `Good` when the asset was last seen in
/// its assigned room, `Misplaced` otherwise.
pub fn derive_status(room_id: &str, last_located: &str) -> AssetStatus {
    if room_id == last_located {
        AssetStatus::Good
    } else {
        AssetStatus::Misplaced
    }
}

/// Outcome of the mark-missing decision for a single asset during an audit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingDecision {
    /// Transition the asset to `Missing`.
    Transition,
    /// Leave the asset untouched, with the reason reported to the caller.
    Skip(SkipReason),
}

/// Why an asset was not transitioned to `Missing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already Lost; the Lost override is never downgraded to Missing.
    AlreadyLost,
    /// Already Good or Found; the asset is accounted for.
    AlreadyFound,
    /// Misplaced, but not yet past the misplaced-age threshold.
    RecentlyMisplaced,
}

impl SkipReason {
    /// Human-readable message fragment for batch result reporting.
    pub fn message(self, asset_id: &str) -> String {
        match self {
            SkipReason::AlreadyLost => format!("Asset {asset_id} already Lost."),
            SkipReason::AlreadyFound => format!("Asset {asset_id} already found."),
            SkipReason::RecentlyMisplaced => format!("Asset {asset_id} recently misplaced."),
        }
    }
}

/// Decide whether an asset transitions to `Missing` during an audit sweep.
///
/// - `Lost` is never overridden.
/// - `Good` and `Found` are accounted for and skipped.
/// - `Misplaced` transitions only when its `last_update` is strictly older
///   than `threshold_date`; an asset updated exactly at the threshold does
///   NOT transition.
/// - Every other status (including an existing `Missing`) transitions
///   unconditionally.
pub fn decide_missing(
    status: AssetStatus,
    last_update: Timestamp,
    threshold_date: Timestamp,
) -> MissingDecision {
    match status {
        AssetStatus::Lost => MissingDecision::Skip(SkipReason::AlreadyLost),
        AssetStatus::Good | AssetStatus::Found => MissingDecision::Skip(SkipReason::AlreadyFound),
        AssetStatus::Misplaced => {
            if last_update < threshold_date {
                MissingDecision::Transition
            } else {
                MissingDecision::Skip(SkipReason::RecentlyMisplaced)
            }
        }
        _ => MissingDecision::Transition,
    }
}

/// Build the scan-event notes for a location update.
///
/// Mentions the room the asset was found in, the move (when the location
/// actually changed), and the status change (when one occurred).
pub fn location_update_notes(
    new_room_name: &str,
    old_room_name: &str,
    moved: bool,
    old_status: AssetStatus,
    new_status: AssetStatus,
) -> String {
    let mut notes = format!("Asset found in {new_room_name}.");
    if moved {
        notes.push_str(&format!(" Moved from {old_room_name}."));
    }
    if old_status != new_status {
        notes.push_str(&format!(
            " Status changed from {old_status} to {new_status}."
        ));
    }
    notes
}

/// Build the change-log summary stored on every scan event.
pub fn change_log_summary(asset_id: &str, room_id: &str, status: &str) -> String {
    format!("Asset {asset_id} scanned in room {room_id} with status {status}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn derive_good_when_in_assigned_room() {
        assert_eq!(derive_status("R1", "R1"), AssetStatus::Good);
    }

    #[test]
    fn derive_misplaced_when_elsewhere() {
        assert_eq!(derive_status("R1", "R2"), AssetStatus::Misplaced);
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            AssetStatus::Good,
            AssetStatus::Misplaced,
            AssetStatus::Missing,
            AssetStatus::Lost,
            AssetStatus::Found,
            AssetStatus::Unassigned,
        ] {
            assert_eq!(AssetStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AssetStatus::parse("Broken"), None);
    }

    #[test]
    fn lost_is_never_marked_missing() {
        let now = Utc::now();
        assert_eq!(
            decide_missing(AssetStatus::Lost, now - Duration::days(365), now),
            MissingDecision::Skip(SkipReason::AlreadyLost)
        );
    }

    #[test]
    fn good_and_found_are_skipped() {
        let now = Utc::now();
        for status in [AssetStatus::Good, AssetStatus::Found] {
            assert_eq!(
                decide_missing(status, now - Duration::days(365), now),
                MissingDecision::Skip(SkipReason::AlreadyFound)
            );
        }
    }

    #[test]
    fn misplaced_older_than_threshold_transitions() {
        let threshold = Utc::now() - Duration::days(30);
        let last_update = threshold - Duration::seconds(1);
        assert_eq!(
            decide_missing(AssetStatus::Misplaced, last_update, threshold),
            MissingDecision::Transition
        );
    }

    #[test]
    fn misplaced_exactly_at_threshold_does_not_transition() {
        // The rule is strict: last_update < threshold_date. Equal stays put.
        let threshold = Utc::now() - Duration::days(30);
        assert_eq!(
            decide_missing(AssetStatus::Misplaced, threshold, threshold),
            MissingDecision::Skip(SkipReason::RecentlyMisplaced)
        );
    }

    #[test]
    fn misplaced_newer_than_threshold_is_skipped() {
        let threshold = Utc::now() - Duration::days(30);
        let last_update = threshold + Duration::days(1);
        assert_eq!(
            decide_missing(AssetStatus::Misplaced, last_update, threshold),
            MissingDecision::Skip(SkipReason::RecentlyMisplaced)
        );
    }

    #[test]
    fn missing_and_unassigned_transition_unconditionally() {
        let now = Utc::now();
        for status in [AssetStatus::Missing, AssetStatus::Unassigned] {
            assert_eq!(
                decide_missing(status, now, now - Duration::days(30)),
                MissingDecision::Transition
            );
        }
    }

    #[test]
    fn location_notes_mention_move_and_status_change() {
        let notes = location_update_notes(
            "Lab 2",
            "Lab 1",
            true,
            AssetStatus::Good,
            AssetStatus::Misplaced,
        );
        assert!(notes.contains("Asset found in Lab 2."));
        assert!(notes.contains("Moved from Lab 1."));
        assert!(notes.contains("Status changed from Good to Misplaced."));
    }

    #[test]
    fn location_notes_omit_unchanged_parts() {
        let notes =
            location_update_notes("Lab 1", "Lab 1", false, AssetStatus::Good, AssetStatus::Good);
        assert_eq!(notes, "Asset found in Lab 1.");
    }
}
