use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::clock::EpochMs;
use crate::streak::CompletedStreak;

/// One recorded setback: the streak it ended, why, and its category.
///
/// Serialized as `{id, startTime, endTime, reason, type}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub start_time: EpochMs,
    pub end_time: EpochMs,
    pub reason: String,
    #[serde(rename = "type")]
    pub setback_type: String,
}

impl HistoryEntry {
    /// Build an entry for a completed streak with a freshly generated id.
    ///
    /// Callers are expected to pass an already-trimmed reason and a
    /// canonical registry label.
    pub fn new(streak: CompletedStreak, reason: impl Into<String>, setback_type: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: streak.start_time,
            end_time: streak.end_time,
            reason: reason.into(),
            setback_type: setback_type.into(),
        }
    }

    /// Length of the streak this entry closed, in milliseconds.
    pub fn duration_ms(&self) -> i64 {
        self.end_time.saturating_sub(self.start_time)
    }

    /// Name of the first field that breaks the entry invariants, if any:
    /// `startTime < endTime`, and non-blank `reason` and `type`.
    pub fn invalid_field(&self) -> Option<&'static str> {
        if self.start_time >= self.end_time {
            Some("endTime")
        } else if self.reason.trim().is_empty() {
            Some("reason")
        } else if self.setback_type.trim().is_empty() {
            Some("type")
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_wire_field_names() {
        let entry = HistoryEntry {
            id: "a".into(),
            start_time: 1,
            end_time: 2,
            reason: "late night".into(),
            setback_type: "Stress".into(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["startTime"], 1);
        assert_eq!(json["endTime"], 2);
        assert_eq!(json["type"], "Stress");
        assert!(json.get("setback_type").is_none());
    }

    #[test]
    fn duration_saturates_at_extremes() {
        let entry = HistoryEntry {
            id: "wide".into(),
            start_time: i64::MIN,
            end_time: i64::MAX,
            reason: "r".into(),
            setback_type: "Other".into(),
        };
        assert_eq!(entry.duration_ms(), i64::MAX);
        assert_eq!(entry.invalid_field(), None);
    }

    #[test]
    fn invalid_field_names_first_broken_invariant() {
        let mut entry = HistoryEntry {
            id: "e".into(),
            start_time: 500,
            end_time: 100,
            reason: " ".into(),
            setback_type: "".into(),
        };
        assert_eq!(entry.invalid_field(), Some("endTime"));
        entry.end_time = 600;
        assert_eq!(entry.invalid_field(), Some("reason"));
        entry.reason = "late night".into();
        assert_eq!(entry.invalid_field(), Some("type"));
        entry.setback_type = "Stress".into();
        assert_eq!(entry.invalid_field(), None);
    }

    #[test]
    fn ids_do_not_collide_within_one_tick() {
        let streak = CompletedStreak {
            start_time: 0,
            end_time: 10,
        };
        let a = HistoryEntry::new(streak, "r", "Other");
        let b = HistoryEntry::new(streak, "r", "Other");
        assert_ne!(a.id, b.id);
        assert_eq!(a.duration_ms(), 10);
    }
}
