use clap::Subcommand;
use serde::Serialize;
use triumph_core::analytics::humanize_duration;
use triumph_core::HistoryEntry;

use super::{open_tracker, print_json, print_mutation, CliResult};

#[derive(Subcommand)]
pub enum HistoryAction {
    /// List setbacks, newest first
    List,
    /// Delete one setback by id
    Delete {
        /// Entry id
        id: String,
    },
    /// Delete every setback (setback types are kept)
    Clear,
}

#[derive(Serialize)]
struct ListedEntry<'a> {
    #[serde(flatten)]
    entry: &'a HistoryEntry,
    streak: String,
}

pub fn run(action: HistoryAction) -> CliResult {
    let mut tracker = open_tracker()?;

    match action {
        HistoryAction::List => {
            let listed: Vec<_> = tracker
                .history()
                .iter()
                .map(|entry| ListedEntry {
                    entry,
                    streak: humanize_duration(entry.duration_ms()),
                })
                .collect();
            print_json(&listed)?;
        }
        HistoryAction::Delete { id } => {
            let event = tracker.delete_entry(&id)?;
            print_mutation(&tracker, &event)?;
        }
        HistoryAction::Clear => {
            let event = tracker.clear_history()?;
            print_mutation(&tracker, &event)?;
        }
    }
    Ok(())
}
