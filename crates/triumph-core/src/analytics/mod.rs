//! Analytics for streaks and setbacks.
//!
//! - [`analyze`]: elapsed time, success rate and trend for coaching
//! - [`report`]: period filters and per-type breakdowns
//! - [`duration`]: display helpers for streak lengths

mod duration;
mod engine;
pub mod report;

pub use duration::{humanize_duration, ElapsedBreakdown};
pub use engine::{analyze, success_rate, trend, AnalyticsSnapshot, Trend};
pub use report::{PeriodReport, StreakSummary, TypeCount};
