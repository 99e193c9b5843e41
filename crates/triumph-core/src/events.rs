use serde::{Deserialize, Serialize};

use crate::clock::EpochMs;
use crate::history::HistoryEntry;

/// Every confirmed tracker mutation produces an Event.
/// The CLI prints them; a GUI would use them to refresh its views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    StreakStarted {
        started_at: EpochMs,
    },
    /// `start` was called while a streak was already running.
    StreakAlreadyRunning {
        started_at: EpochMs,
    },
    SetbackRecorded {
        entry: HistoryEntry,
    },
    EntryDeleted {
        id: String,
        /// `false` when no entry had the id.
        removed: bool,
    },
    HistoryCleared {
        removed: usize,
    },
    SetbackTypeAdded {
        label: String,
        /// `false` when the label matched an existing one.
        created: bool,
    },
    SetbackTypeRemoved {
        label: String,
        removed: bool,
    },
}
