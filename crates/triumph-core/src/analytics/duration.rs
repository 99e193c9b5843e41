//! Duration formatting for streak display.

use serde::{Deserialize, Serialize};

const SECOND_MS: i64 = 1_000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

/// A running streak split into clock units, as shown on the live timer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElapsedBreakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl ElapsedBreakdown {
    /// Non-positive durations collapse to all zeros.
    pub fn from_ms(ms: i64) -> Self {
        if ms <= 0 {
            return Self::default();
        }
        Self {
            days: ms / DAY_MS,
            hours: (ms / HOUR_MS) % 24,
            minutes: (ms / MINUTE_MS) % 60,
            seconds: (ms / SECOND_MS) % 60,
        }
    }
}

impl std::fmt::Display for ElapsedBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.days > 0 {
            write!(f, "{}d ", self.days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Express a duration in the single largest fitting unit, rounded
/// ("45 seconds", "3 hours", "1 month").
pub fn humanize_duration(ms: i64) -> String {
    let ms = ms.max(0) as f64;
    let (value, unit) = if ms < MINUTE_MS as f64 {
        (ms / SECOND_MS as f64, "second")
    } else if ms < HOUR_MS as f64 {
        (ms / MINUTE_MS as f64, "minute")
    } else if ms < DAY_MS as f64 {
        (ms / HOUR_MS as f64, "hour")
    } else if ms < 30.0 * DAY_MS as f64 {
        (ms / DAY_MS as f64, "day")
    } else if ms < 365.0 * DAY_MS as f64 {
        (ms / (30.0 * DAY_MS as f64), "month")
    } else {
        (ms / (365.0 * DAY_MS as f64), "year")
    };
    let n = value.round() as i64;
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakdown_splits_units() {
        let ms = 2 * DAY_MS + 3 * HOUR_MS + 4 * MINUTE_MS + 5 * SECOND_MS + 999;
        let b = ElapsedBreakdown::from_ms(ms);
        assert_eq!(b, ElapsedBreakdown { days: 2, hours: 3, minutes: 4, seconds: 5 });
        assert_eq!(b.to_string(), "2d 03:04:05");
    }

    #[test]
    fn breakdown_of_negative_is_zero() {
        assert_eq!(ElapsedBreakdown::from_ms(-5), ElapsedBreakdown::default());
        assert_eq!(ElapsedBreakdown::from_ms(59_000).to_string(), "00:00:59");
    }

    #[test]
    fn humanize_picks_largest_unit() {
        assert_eq!(humanize_duration(45 * SECOND_MS), "45 seconds");
        assert_eq!(humanize_duration(MINUTE_MS), "1 minute");
        assert_eq!(humanize_duration(3 * HOUR_MS + 10 * MINUTE_MS), "3 hours");
        assert_eq!(humanize_duration(2 * DAY_MS), "2 days");
        assert_eq!(humanize_duration(31 * DAY_MS), "1 month");
        assert_eq!(humanize_duration(800 * DAY_MS), "2 years");
        assert_eq!(humanize_duration(-1), "0 seconds");
    }
}
