use chrono::{Datelike, Utc};
use clap::Args;
use triumph_core::analytics::report;

use super::{open_tracker, print_json, CliResult};

#[derive(Args)]
pub struct ReportArgs {
    /// Year to report on (defaults to the current year when --month is given)
    #[arg(long)]
    year: Option<i32>,
    /// Month to report on, 1-12
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,
    /// Report on the whole history
    #[arg(long, conflicts_with_all = ["year", "month"])]
    all: bool,
}

pub fn run(args: ReportArgs) -> CliResult {
    let tracker = open_tracker()?;
    let today = Utc::now();

    let (year, month) = match (args.all, args.year, args.month) {
        (true, _, _) => (None, None),
        (false, None, None) => (Some(today.year()), Some(today.month())),
        (false, None, Some(m)) => (Some(today.year()), Some(m)),
        (false, Some(y), m) => (Some(y), m),
    };

    let report = report::period_report(tracker.history(), year, month);
    print_json(&report)
}
