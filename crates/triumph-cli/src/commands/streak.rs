use clap::Subcommand;
use serde::Serialize;
use triumph_core::analytics::ElapsedBreakdown;
use triumph_core::{AnalyticsSnapshot, CoreError, StateError, StreakState, ValidationError};

use super::{open_tracker, print_json, print_mutation, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Start a streak (no-op if one is running)
    Start,
    /// End the running streak and record a setback
    Stop {
        /// What led to the setback
        #[arg(long)]
        reason: String,
        /// Setback type; new labels are registered automatically
        #[arg(long = "type")]
        setback_type: String,
    },
    /// Print current streak state as JSON
    Status,
}

#[derive(Serialize)]
struct StatusOutput {
    streak: StreakState,
    elapsed: ElapsedBreakdown,
    display: String,
    analytics: AnalyticsSnapshot,
}

pub fn run(action: StreakAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        StreakAction::Start => {
            let event = tracker.start()?;
            print_mutation(&tracker, &event)?;
        }
        StreakAction::Stop { reason, setback_type } => {
            // Checked before registering so a rejected stop leaves the registry alone.
            if !tracker.streak().is_running() {
                return Err(CoreError::from(StateError::NotRunning).into());
            }
            if reason.trim().is_empty() {
                return Err(CoreError::from(ValidationError::Empty { field: "reason" }).into());
            }
            let label = tracker.add_setback_type(&setback_type)?;
            let event = tracker.stop(&reason, &label)?;
            print_mutation(&tracker, &event)?;
        }
        StreakAction::Status => {
            let elapsed = ElapsedBreakdown::from_ms(tracker.elapsed_ms());
            print_json(&StatusOutput {
                streak: tracker.streak(),
                elapsed,
                display: elapsed.to_string(),
                analytics: tracker.analytics(),
            })?;
        }
    }
    Ok(())
}
