//! Streak analytics.
//!
//! [`analyze`] is a pure function of the history, the streak state and a
//! clock reading. Nothing here is persisted; callers recompute after every
//! mutation.

use serde::{Deserialize, Serialize};

use crate::clock::EpochMs;
use crate::history::HistoryEntry;
use crate::streak::StreakState;

/// Recent streaks must beat older ones by this factor to count as improving.
const IMPROVING_FACTOR: f64 = 1.1;
/// Recent streaks below this fraction of older ones count as worsening.
const WORSENING_FACTOR: f64 = 0.9;
/// Success rate reported with no history and no running streak.
const NEUTRAL_SUCCESS_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Worsening,
    Stable,
}

impl Trend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Worsening => "worsening",
            Trend::Stable => "stable",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSnapshot {
    /// Seconds the current streak has run (0 when idle).
    pub elapsed_time: f64,
    /// Heuristic estimate in `[0, 1]`.
    pub success_rate: f64,
    pub trend: Trend,
    pub failure_count: usize,
}

/// Derive analytics from newest-first `history` and the streak state at `now`.
pub fn analyze(history: &[HistoryEntry], streak: &StreakState, now: EpochMs) -> AnalyticsSnapshot {
    let intervals: Vec<f64> = history.iter().map(|e| e.duration_ms() as f64).collect();
    let avg_interval_ms = mean(&intervals).unwrap_or(0.0);
    let elapsed_time = streak.elapsed_ms(now) as f64 / 1000.0;

    AnalyticsSnapshot {
        elapsed_time,
        success_rate: success_rate(elapsed_time, avg_interval_ms / 1000.0),
        trend: trend(&intervals),
        failure_count: history.len(),
    }
}

/// Current streak measured against the historical average, both in seconds.
pub fn success_rate(elapsed_secs: f64, avg_interval_secs: f64) -> f64 {
    let rate = if avg_interval_secs > 0.0 {
        elapsed_secs / (elapsed_secs + avg_interval_secs)
    } else if elapsed_secs > 0.0 {
        1.0
    } else {
        NEUTRAL_SUCCESS_RATE
    };
    if rate.is_nan() {
        return NEUTRAL_SUCCESS_RATE;
    }
    rate.clamp(0.0, 1.0)
}

/// Compare the newer half of `intervals` (index 0 newest) against the older
/// half. With an odd count the extra interval goes to the newer half.
pub fn trend(intervals: &[f64]) -> Trend {
    if intervals.len() < 2 {
        return Trend::Stable;
    }
    let midpoint = intervals.len().div_ceil(2);
    let (recent, older) = intervals.split_at(midpoint);
    let Some(avg_recent) = mean(recent) else {
        return Trend::Stable;
    };
    let avg_older = mean(older).unwrap_or(avg_recent);

    if avg_recent > avg_older * IMPROVING_FACTOR {
        Trend::Improving
    } else if avg_recent < avg_older * WORSENING_FACTOR {
        Trend::Worsening
    } else {
        Trend::Stable
    }
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn history_from(intervals: &[i64]) -> Vec<HistoryEntry> {
        let mut start = 0;
        intervals
            .iter()
            .enumerate()
            .map(|(i, len)| {
                let entry = HistoryEntry {
                    id: i.to_string(),
                    start_time: start,
                    end_time: start + len,
                    reason: "r".into(),
                    setback_type: "Other".into(),
                };
                start += len + 1;
                entry
            })
            .collect()
    }

    #[test]
    fn empty_and_idle_is_neutral() {
        let snap = analyze(&[], &StreakState::Idle, 1_000);
        assert_eq!(snap.success_rate, 0.5);
        assert_eq!(snap.elapsed_time, 0.0);
        assert_eq!(snap.trend, Trend::Stable);
        assert_eq!(snap.failure_count, 0);
    }

    #[test]
    fn running_without_history_is_full_success() {
        let streak = StreakState::Running { started_at: 0 };
        let snap = analyze(&[], &streak, 30_000);
        assert_eq!(snap.elapsed_time, 30.0);
        assert_eq!(snap.success_rate, 1.0);
    }

    #[test]
    fn success_rate_compares_in_seconds() {
        // One past streak of 60s, current streak at 60s.
        let history = history_from(&[60_000]);
        let streak = StreakState::Running { started_at: 100_000 };
        let snap = analyze(&history, &streak, 160_000);
        assert!((snap.success_rate - 0.5).abs() < 1e-12);
        assert_eq!(snap.failure_count, 1);
    }

    #[test]
    fn idle_with_history_has_zero_success() {
        let history = history_from(&[5_000, 7_000]);
        let snap = analyze(&history, &StreakState::Idle, 99_000);
        assert_eq!(snap.success_rate, 0.0);
    }

    #[test]
    fn longer_recent_streaks_improve() {
        assert_eq!(trend(&[100.0, 100.0, 100.0, 10.0, 10.0, 10.0]), Trend::Improving);
    }

    #[test]
    fn shorter_recent_streaks_worsen() {
        assert_eq!(trend(&[10.0, 10.0, 10.0, 100.0, 100.0, 100.0]), Trend::Worsening);
    }

    #[test]
    fn equal_streaks_are_stable() {
        assert_eq!(trend(&[50.0, 50.0, 50.0, 50.0]), Trend::Stable);
    }

    #[test]
    fn changes_within_ten_percent_are_stable() {
        assert_eq!(trend(&[105.0, 100.0]), Trend::Stable);
        assert_eq!(trend(&[95.0, 100.0]), Trend::Stable);
    }

    #[test]
    fn odd_count_gives_extra_to_recent_half() {
        // recent = [30, 30], older = [10]
        assert_eq!(trend(&[30.0, 30.0, 10.0]), Trend::Improving);
    }

    #[test]
    fn trend_from_history_uses_durations() {
        let history = history_from(&[100, 100, 10, 10]);
        let snap = analyze(&history, &StreakState::Idle, 0);
        assert_eq!(snap.trend, Trend::Improving);
    }

    #[test]
    fn trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Worsening).unwrap(), "\"worsening\"");
    }

    proptest! {
        #[test]
        fn success_rate_is_bounded(
            intervals in proptest::collection::vec(0i64..10_000_000_000, 0..20),
            started in proptest::option::of(0i64..10_000_000_000),
            now in 0i64..20_000_000_000,
        ) {
            let history = history_from(&intervals);
            let streak = match started {
                Some(started_at) => StreakState::Running { started_at },
                None => StreakState::Idle,
            };
            let snap = analyze(&history, &streak, now);
            prop_assert!((0.0..=1.0).contains(&snap.success_rate));
            prop_assert!(snap.elapsed_time >= 0.0);
            prop_assert_eq!(snap.failure_count, intervals.len());
        }

        #[test]
        fn fewer_than_two_intervals_is_stable(intervals in proptest::collection::vec(0.0f64..1e12, 0..2)) {
            prop_assert_eq!(trend(&intervals), Trend::Stable);
        }
    }
}
