//! Streak state machine.
//!
//! The machine is pure: it takes the current instant as an argument and never
//! touches storage. The [`crate::Tracker`] shell persists every transition.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Running --stop(reason, type)--> Idle
//! ```

use serde::{Deserialize, Serialize};

use crate::clock::EpochMs;
use crate::error::StateError;

/// Whether a streak is running, and since when.
///
/// Modelled as an enum so a running streak always carries its start instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum StreakState {
    #[default]
    Idle,
    Running {
        #[serde(rename = "startedAt")]
        started_at: EpochMs,
    },
}

/// A completed streak, produced by [`StreakState::stop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletedStreak {
    pub start_time: EpochMs,
    pub end_time: EpochMs,
}

impl StreakState {
    // ── Queries ──────────────────────────────────────────────────────

    pub fn is_running(&self) -> bool {
        matches!(self, StreakState::Running { .. })
    }

    pub fn started_at(&self) -> Option<EpochMs> {
        match self {
            StreakState::Idle => None,
            StreakState::Running { started_at } => Some(*started_at),
        }
    }

    /// Milliseconds the current streak has run at `now` (0 when idle).
    pub fn elapsed_ms(&self, now: EpochMs) -> i64 {
        self.started_at()
            .map(|start| now.saturating_sub(start).max(0))
            .unwrap_or(0)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a streak. Returns `false` when one is already running; the
    /// in-progress streak keeps its original start instant.
    pub fn start(&mut self, now: EpochMs) -> bool {
        match self {
            StreakState::Idle => {
                *self = StreakState::Running { started_at: now };
                true
            }
            StreakState::Running { .. } => false,
        }
    }

    /// End the running streak and return its bounds.
    ///
    /// `end_time` is forced past `start_time` so a stop in the same
    /// millisecond as the start still yields a non-empty interval.
    pub fn stop(&mut self, now: EpochMs) -> Result<CompletedStreak, StateError> {
        match *self {
            StreakState::Idle => Err(StateError::NotRunning),
            StreakState::Running { started_at } => {
                *self = StreakState::Idle;
                Ok(CompletedStreak {
                    start_time: started_at,
                    end_time: now.max(started_at.saturating_add(1)),
                })
            }
        }
    }
}
