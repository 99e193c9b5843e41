//! Tracker shell.
//!
//! Owns the streak state, setback history and type registry together with
//! the persistence port and clock. Each command mutates the in-memory state,
//! writes the affected keys, and returns an [`Event`] once the store has
//! acknowledged the write.
//!
//! If a write fails the in-memory state is rolled back to what it was before
//! the command, the previous values are written back on a best-effort basis,
//! and the caller receives [`CoreError::Persistence`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut tracker = Tracker::open(SqliteStore::open()?);
//! tracker.start()?;
//! let label = tracker.add_setback_type("Late night")?;
//! tracker.stop("stayed up scrolling", &label)?;
//! let snapshot = tracker.analytics();
//! coach.refresh(&snapshot).await;
//! ```

use tracing::{error, info, warn};

use crate::analytics::{analyze, AnalyticsSnapshot};
use crate::clock::{Clock, SystemClock};
use crate::error::{CoreError, PersistenceError, Result, StateError, ValidationError};
use crate::events::Event;
use crate::history::{HistoryEntry, HistoryStore};
use crate::setback_types::SetbackTypeRegistry;
use crate::storage::records;
use crate::storage::KeyValueStore;
use crate::streak::StreakState;

/// Which persisted values a command touched.
#[derive(Debug, Clone, Copy, Default)]
struct Touched {
    streak: bool,
    history: bool,
    types: bool,
}

/// In-memory state before a command, for rollback.
struct Checkpoint {
    streak: StreakState,
    history: HistoryStore,
    types: SetbackTypeRegistry,
}

pub struct Tracker<S, C = SystemClock> {
    store: S,
    clock: C,
    streak: StreakState,
    history: HistoryStore,
    types: SetbackTypeRegistry,
}

impl<S: KeyValueStore> Tracker<S, SystemClock> {
    /// Load state from `store` using the system clock.
    pub fn open(store: S) -> Self {
        Self::with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    /// Load state from `store`. Unreadable values fall back to defaults.
    pub fn with_clock(store: S, clock: C) -> Self {
        let streak = records::load_streak(&store);
        let history = records::load_history(&store);
        let types = records::load_setback_types(&store);
        Self {
            store,
            clock,
            streak,
            history,
            types,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn streak(&self) -> StreakState {
        self.streak
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.list()
    }

    pub fn setback_types(&self) -> &SetbackTypeRegistry {
        &self.types
    }

    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Milliseconds the current streak has run (0 when idle).
    pub fn elapsed_ms(&self) -> i64 {
        self.streak.elapsed_ms(self.clock.now_ms())
    }

    /// Fresh analytics for the current state.
    pub fn analytics(&self) -> AnalyticsSnapshot {
        analyze(self.history.list(), &self.streak, self.clock.now_ms())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start a streak. Starting while one is running changes nothing and
    /// reports [`Event::StreakAlreadyRunning`].
    pub fn start(&mut self) -> Result<Event> {
        let checkpoint = self.checkpoint();
        let now = self.clock.now_ms();
        if !self.streak.start(now) {
            let started_at = self.streak.started_at().unwrap_or(now);
            return Ok(Event::StreakAlreadyRunning { started_at });
        }
        self.commit(
            checkpoint,
            Touched {
                streak: true,
                ..Touched::default()
            },
        )?;
        info!(started_at = now, "streak started");
        Ok(Event::StreakStarted { started_at: now })
    }

    /// End the running streak and record it as a setback.
    ///
    /// `setback_type` must already be registered; use
    /// [`Tracker::add_setback_type`] first for a new label. The stored entry
    /// uses the registry's canonical spelling.
    pub fn stop(&mut self, reason: &str, setback_type: &str) -> Result<Event> {
        if !self.streak.is_running() {
            return Err(StateError::NotRunning.into());
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ValidationError::Empty { field: "reason" }.into());
        }
        if setback_type.trim().is_empty() {
            return Err(ValidationError::Empty { field: "type" }.into());
        }
        let label = self
            .types
            .resolve(setback_type)
            .ok_or_else(|| ValidationError::UnknownType(setback_type.trim().to_string()))?
            .to_string();

        let checkpoint = self.checkpoint();
        let completed = self.streak.stop(self.clock.now_ms())?;
        let entry = HistoryEntry::new(completed, reason, label);
        self.history.append(entry.clone());

        self.commit(
            checkpoint,
            Touched {
                streak: true,
                history: true,
                ..Touched::default()
            },
        )?;
        info!(id = %entry.id, setback_type = %entry.setback_type, "setback recorded");
        Ok(Event::SetbackRecorded { entry })
    }

    /// Delete a history entry. An unknown id is not an error.
    pub fn delete_entry(&mut self, id: &str) -> Result<Event> {
        let checkpoint = self.checkpoint();
        let removed = self.history.delete(id).is_some();
        self.commit(
            checkpoint,
            Touched {
                history: true,
                ..Touched::default()
            },
        )?;
        Ok(Event::EntryDeleted {
            id: id.to_string(),
            removed,
        })
    }

    /// Remove every history entry. Setback types are kept.
    pub fn clear_history(&mut self) -> Result<Event> {
        let checkpoint = self.checkpoint();
        let removed = self.history.len();
        self.history.clear();
        self.commit(
            checkpoint,
            Touched {
                history: true,
                ..Touched::default()
            },
        )?;
        Ok(Event::HistoryCleared { removed })
    }

    /// Register a setback type and return the canonical label to use.
    pub fn add_setback_type(&mut self, label: &str) -> Result<String> {
        self.register_type(label).map(|(canonical, _)| canonical)
    }

    pub fn add_setback_type_event(&mut self, label: &str) -> Result<Event> {
        let (label, created) = self.register_type(label)?;
        Ok(Event::SetbackTypeAdded { label, created })
    }

    /// Remove a user-added setback type. Built-in types are protected.
    ///
    /// A caller holding the removed label as a pending selection should
    /// clear it when the event reports `removed: true`.
    pub fn remove_setback_type(&mut self, label: &str) -> Result<Event> {
        let checkpoint = self.checkpoint();
        let Some(canonical) = self.types.remove(label)? else {
            return Ok(Event::SetbackTypeRemoved {
                label: label.trim().to_string(),
                removed: false,
            });
        };
        self.commit(
            checkpoint,
            Touched {
                types: true,
                ..Touched::default()
            },
        )?;
        Ok(Event::SetbackTypeRemoved {
            label: canonical,
            removed: true,
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn register_type(&mut self, label: &str) -> Result<(String, bool)> {
        let checkpoint = self.checkpoint();
        let (canonical, created) = self.types.add(label)?;
        if created {
            self.commit(
                checkpoint,
                Touched {
                    types: true,
                    ..Touched::default()
                },
            )?;
        }
        Ok((canonical, created))
    }

    fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            streak: self.streak,
            history: self.history.clone(),
            types: self.types.clone(),
        }
    }

    fn write(&mut self, touched: Touched) -> Result<(), PersistenceError> {
        if touched.history {
            records::save_history(&mut self.store, &self.history)?;
        }
        if touched.streak {
            records::save_streak(&mut self.store, &self.streak)?;
        }
        if touched.types {
            records::save_setback_types(&mut self.store, &self.types)?;
        }
        Ok(())
    }

    fn commit(&mut self, checkpoint: Checkpoint, touched: Touched) -> Result<(), CoreError> {
        let Err(err) = self.write(touched) else {
            return Ok(());
        };
        warn!(error = %err, "write failed, rolling back");
        self.streak = checkpoint.streak;
        self.history = checkpoint.history;
        self.types = checkpoint.types;
        if let Err(restore_err) = self.write(touched) {
            error!(error = %restore_err, "could not restore previous persisted state");
        }
        Err(err.into())
    }
}
