use serde::Serialize;
use triumph_core::{AnalyticsSnapshot, CoachMessage};

use super::{open_tracker, print_json, refresh_coaching, CliResult};

#[derive(Serialize)]
struct CoachOutput {
    classifier: &'static str,
    analytics: AnalyticsSnapshot,
    #[serde(flatten)]
    message: CoachMessage,
}

pub fn run() -> CliResult {
    let tracker = open_tracker()?;
    let (refresh, classifier) = refresh_coaching(&tracker)?;

    print_json(&CoachOutput {
        classifier,
        analytics: refresh.analytics,
        message: refresh.message,
    })
}
