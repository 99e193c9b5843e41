//! Setback reports: period filters, per-type breakdowns and streak summaries.
//!
//! Periods are calendar years and months of an entry's `end_time`, in UTC.

use std::collections::BTreeSet;
use std::collections::HashMap;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::history::HistoryEntry;

/// Number of setbacks recorded under one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub setback_type: String,
    pub count: usize,
}

/// Aggregate streak lengths over a set of entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StreakSummary {
    pub count: usize,
    pub longest_ms: i64,
    pub shortest_ms: i64,
    pub average_ms: f64,
}

/// Everything the report view shows for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodReport {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub available_years: Vec<i32>,
    pub summary: StreakSummary,
    pub by_type: Vec<TypeCount>,
    pub entries: Vec<HistoryEntry>,
}

fn end_date(entry: &HistoryEntry) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_millis(entry.end_time)
}

/// Distinct years with at least one setback, most recent first.
pub fn available_years(history: &[HistoryEntry]) -> Vec<i32> {
    let years: BTreeSet<i32> = history
        .iter()
        .filter_map(end_date)
        .map(|d| d.year())
        .collect();
    years.into_iter().rev().collect()
}

/// Entries that ended in `year` (and `month`, 1-12, when given). Order is
/// preserved.
pub fn filter_period(history: &[HistoryEntry], year: i32, month: Option<u32>) -> Vec<HistoryEntry> {
    history
        .iter()
        .filter(|entry| {
            end_date(entry).is_some_and(|d| d.year() == year && month.map_or(true, |m| d.month() == m))
        })
        .cloned()
        .collect()
}

/// Setback counts per type, most frequent first, ties broken by label.
pub fn breakdown_by_type(entries: &[HistoryEntry]) -> Vec<TypeCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for entry in entries {
        *counts.entry(entry.setback_type.as_str()).or_default() += 1;
    }
    let mut out: Vec<TypeCount> = counts
        .into_iter()
        .map(|(t, count)| TypeCount {
            setback_type: t.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.setback_type.cmp(&b.setback_type)));
    out
}

pub fn summarize(entries: &[HistoryEntry]) -> StreakSummary {
    if entries.is_empty() {
        return StreakSummary::default();
    }
    let durations: Vec<i64> = entries.iter().map(HistoryEntry::duration_ms).collect();
    let total: f64 = durations.iter().map(|&d| d as f64).sum();
    StreakSummary {
        count: durations.len(),
        longest_ms: durations.iter().copied().max().unwrap_or(0),
        shortest_ms: durations.iter().copied().min().unwrap_or(0),
        average_ms: total / durations.len() as f64,
    }
}

/// Build a report for an optional period. Without a year the whole history
/// is used and `month` is ignored.
pub fn period_report(history: &[HistoryEntry], year: Option<i32>, month: Option<u32>) -> PeriodReport {
    let entries = match year {
        Some(y) => filter_period(history, y, month),
        None => history.to_vec(),
    };
    PeriodReport {
        year,
        month: year.and(month),
        available_years: available_years(history),
        summary: summarize(&entries),
        by_type: breakdown_by_type(&entries),
        entries,
    }
}
