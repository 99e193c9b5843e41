pub mod coach;
pub mod config;
pub mod history;
pub mod report;
pub mod streak;
pub mod types;

use serde::Serialize;
use triumph_core::coach::Refresh;
use triumph_core::{AnalyticsSnapshot, Coach, CoachMessage, Config, Event, SqliteStore, Tracker};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the tracker over the on-disk store.
pub fn open_tracker() -> Result<Tracker<SqliteStore>, Box<dyn std::error::Error>> {
    Ok(Tracker::open(SqliteStore::open()?))
}

pub fn print_json<T: Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Refresh the coaching message for the tracker's current state using the
/// configured classifier. Returns the refresh and the classifier's name.
pub fn refresh_coaching(
    tracker: &Tracker<SqliteStore>,
) -> Result<(Refresh, &'static str), Box<dyn std::error::Error>> {
    let coach = Coach::from_config(&Config::load_or_default());
    let runtime = tokio::runtime::Runtime::new()?;
    let refresh = runtime.block_on(coach.refresh_after(tracker));
    tracing::debug!(tag = ?refresh.tag, published = refresh.published, "coach refreshed");
    Ok((refresh, coach.classifier().name()))
}

/// A confirmed mutation with the analytics and coaching message it produced.
#[derive(Serialize)]
pub struct MutationOutput<'a> {
    pub event: &'a Event,
    pub analytics: AnalyticsSnapshot,
    #[serde(flatten)]
    pub message: CoachMessage,
}

pub fn print_mutation(tracker: &Tracker<SqliteStore>, event: &Event) -> CliResult {
    let (refresh, _) = refresh_coaching(tracker)?;
    print_json(&MutationOutput {
        event,
        analytics: refresh.analytics,
        message: refresh.message,
    })
}
