//! Purchase records and the history views derived from them.
//!
//! One `user_slices` row exists per physical unit purchased; a quantity of N
//! expands into N rows at purchase time. A row is pending while `eaten_at`
//! is unset and consumed once set; the transition is one-way and happens
//! exactly once per row.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One purchased unit, pending until its consumption timestamp is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PurchaseRecord {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning user.
    pub user_id: i64,
    /// Purchased slice.
    pub slice_id: i64,
    /// When the unit was bought (UTC).
    pub purchased_at: DateTime<Utc>,
    /// When the unit was eaten, if it has been.
    #[serde(default)]
    pub eaten_at: Option<DateTime<Utc>>,
}

impl PurchaseRecord {
    /// Whether this unit is still awaiting consumption.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.eaten_at.is_none()
    }
}

/// Compact history item embedded in `GET /users` responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct HistorySummary {
    /// Flavour name of the purchased slice.
    #[serde(rename = "sliceName")]
    pub slice_name: String,
    /// Purchase time (UTC).
    pub timestamp: DateTime<Utc>,
}

/// Full history row returned by `GET /user_history/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct HistoryEntry {
    /// Purchase record identifier, used to log consumption.
    pub id: i64,
    /// Flavour name of the purchased slice.
    #[serde(rename = "sliceName")]
    pub slice_name: String,
    /// Purchase time (UTC).
    pub purchased_at: DateTime<Utc>,
    /// Consumption time (UTC), `null` while pending.
    pub eaten_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use super::*;
    use serde_json::json;

    #[test]
    fn rows_without_eaten_at_decode_as_pending() {
        let row = json!({
            "id": 12,
            "user_id": 1,
            "slice_id": 4,
            "purchased_at": "2026-02-01T12:00:00Z"
        });
        let record: PurchaseRecord = serde_json::from_value(row).expect("row should decode");
        assert!(record.is_pending());
    }

    #[test]
    fn rows_with_eaten_at_are_consumed() {
        let row = json!({
            "id": 12,
            "user_id": 1,
            "slice_id": 4,
            "purchased_at": "2026-02-01T12:00:00Z",
            "eaten_at": "2026-02-01T12:30:00Z"
        });
        let record: PurchaseRecord = serde_json::from_value(row).expect("row should decode");
        assert!(!record.is_pending());
    }

    #[test]
    fn history_summary_uses_the_original_wire_name() {
        let summary = HistorySummary {
            slice_name: "Margherita".to_owned(),
            timestamp: "2026-02-01T12:00:00Z".parse().expect("valid timestamp"),
        };
        let value = serde_json::to_value(summary).expect("serialise summary");
        assert!(value.get("sliceName").is_some());
        assert!(value.get("slice_name").is_none());
    }
}
