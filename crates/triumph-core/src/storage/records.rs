//! Reading and writing tracker state through the key-value port.
//!
//! Loaders never fail: a missing key, an unreadable value or a store error
//! yields the documented default and a log line. Savers surface write
//! failures as [`PersistenceError`].

use tracing::{debug, warn};

use super::port::{KeyValueStore, KEY_CUSTOM_TYPES, KEY_HISTORY, KEY_STREAK_RUNNING, KEY_STREAK_STARTED_AT};
use crate::error::PersistenceError;
use crate::history::{HistoryEntry, HistoryStore};
use crate::setback_types::SetbackTypeRegistry;
use crate::streak::StreakState;

fn read_raw<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(Some(value)) => Some(value),
        Ok(None) => {
            debug!(key, "key absent, using default");
            None
        }
        Err(e) => {
            warn!(key, error = %e, "read failed, using default");
            None
        }
    }
}

pub fn load_streak<S: KeyValueStore + ?Sized>(store: &S) -> StreakState {
    let running = match read_raw(store, KEY_STREAK_RUNNING).as_deref().map(str::trim) {
        Some("true") => true,
        Some("false") | None => false,
        Some(other) => {
            warn!(key = KEY_STREAK_RUNNING, value = other, "unparsable running flag, treating as idle");
            false
        }
    };
    if !running {
        return StreakState::Idle;
    }
    match read_raw(store, KEY_STREAK_STARTED_AT).map(|raw| raw.trim().parse::<i64>()) {
        // A start at the last representable instant leaves no room for an end.
        Some(Ok(started_at)) if started_at < i64::MAX => StreakState::Running { started_at },
        Some(Ok(started_at)) => {
            warn!(key = KEY_STREAK_STARTED_AT, started_at, "start instant out of range, treating as idle");
            StreakState::Idle
        }
        Some(Err(e)) => {
            warn!(key = KEY_STREAK_STARTED_AT, error = %e, "unparsable start instant, treating as idle");
            StreakState::Idle
        }
        None => {
            warn!("running flag set without a start instant, treating as idle");
            StreakState::Idle
        }
    }
}

/// Persist the streak. The start instant is written before the running flag
/// and removed after it, so an interrupted write never reads back as a
/// running streak without a start.
pub fn save_streak<S: KeyValueStore + ?Sized>(store: &mut S, state: &StreakState) -> Result<(), PersistenceError> {
    match state {
        StreakState::Running { started_at } => {
            store.set(KEY_STREAK_STARTED_AT, &started_at.to_string())?;
            store.set(KEY_STREAK_RUNNING, "true")
        }
        StreakState::Idle => {
            store.set(KEY_STREAK_RUNNING, "false")?;
            store.remove(KEY_STREAK_STARTED_AT)
        }
    }
}

pub fn load_history<S: KeyValueStore + ?Sized>(store: &S) -> HistoryStore {
    let Some(raw) = read_raw(store, KEY_HISTORY) else {
        return HistoryStore::new();
    };
    match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
        Ok(entries) => HistoryStore::from_entries(
            entries
                .into_iter()
                .filter(|entry| match entry.invalid_field() {
                    None => true,
                    Some(field) => {
                        warn!(key = KEY_HISTORY, id = %entry.id, field, "dropping invalid history entry");
                        false
                    }
                })
                .collect(),
        ),
        Err(e) => {
            warn!(key = KEY_HISTORY, error = %e, "malformed history, starting empty");
            HistoryStore::new()
        }
    }
}

pub fn encode_history(history: &HistoryStore) -> Result<String, PersistenceError> {
    serde_json::to_string(history.list()).map_err(|e| PersistenceError::write(KEY_HISTORY, e))
}

pub fn save_history<S: KeyValueStore + ?Sized>(store: &mut S, history: &HistoryStore) -> Result<(), PersistenceError> {
    let json = encode_history(history)?;
    store.set(KEY_HISTORY, &json)
}

pub fn load_setback_types<S: KeyValueStore + ?Sized>(store: &S) -> SetbackTypeRegistry {
    let Some(raw) = read_raw(store, KEY_CUSTOM_TYPES) else {
        return SetbackTypeRegistry::new();
    };
    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(labels) => SetbackTypeRegistry::with_custom(labels),
        Err(e) => {
            warn!(key = KEY_CUSTOM_TYPES, error = %e, "malformed custom types, using built-in defaults");
            SetbackTypeRegistry::new()
        }
    }
}

pub fn save_setback_types<S: KeyValueStore + ?Sized>(
    store: &mut S,
    registry: &SetbackTypeRegistry,
) -> Result<(), PersistenceError> {
    let json = serde_json::to_string(registry.custom()).map_err(|e| PersistenceError::write(KEY_CUSTOM_TYPES, e))?;
    store.set(KEY_CUSTOM_TYPES, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let store = MemoryStore::new();
        assert_eq!(load_streak(&store), StreakState::Idle);
        assert!(load_history(&store).is_empty());
        assert!(load_setback_types(&store).custom().is_empty());
    }

    #[test]
    fn malformed_values_fall_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(KEY_STREAK_RUNNING, "yes").unwrap();
        store.set(KEY_HISTORY, "[{not json").unwrap();
        store.set(KEY_CUSTOM_TYPES, "{}").unwrap();
        assert_eq!(load_streak(&store), StreakState::Idle);
        assert!(load_history(&store).is_empty());
        assert_eq!(load_setback_types(&store).list().len(), 5);
    }

    #[test]
    fn running_without_start_is_idle() {
        let mut store = MemoryStore::new();
        store.set(KEY_STREAK_RUNNING, "true").unwrap();
        assert_eq!(load_streak(&store), StreakState::Idle);
        store.set(KEY_STREAK_STARTED_AT, "soon").unwrap();
        assert_eq!(load_streak(&store), StreakState::Idle);
    }

    #[test]
    fn start_at_last_instant_loads_as_idle() {
        let mut store = MemoryStore::new();
        store.set(KEY_STREAK_RUNNING, "true").unwrap();
        store.set(KEY_STREAK_STARTED_AT, &i64::MAX.to_string()).unwrap();
        assert_eq!(load_streak(&store), StreakState::Idle);

        store.set(KEY_STREAK_STARTED_AT, &(i64::MAX - 1).to_string()).unwrap();
        assert_eq!(load_streak(&store), StreakState::Running { started_at: i64::MAX - 1 });
    }

    #[test]
    fn invalid_history_entries_are_dropped() {
        let mut store = MemoryStore::new();
        let raw = r#"[
            {"id":"ok","startTime":100,"endTime":200,"reason":"party","type":"Social"},
            {"id":"backwards","startTime":500,"endTime":100,"reason":"r","type":"Stress"},
            {"id":"instant","startTime":300,"endTime":300,"reason":"r","type":"Stress"},
            {"id":"no-reason","startTime":1,"endTime":2,"reason":"  ","type":"Stress"},
            {"id":"no-type","startTime":1,"endTime":2,"reason":"r","type":""},
            {"id":"wide","startTime":-9223372036854775808,"endTime":9223372036854775807,"reason":"r","type":"Other"}
        ]"#;
        store.set(KEY_HISTORY, raw).unwrap();

        let history = load_history(&store);
        let ids: Vec<_> = history.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["ok", "wide"]);
    }

    #[test]
    fn streak_roundtrip_and_idle_removes_start() {
        let mut store = MemoryStore::new();
        save_streak(&mut store, &StreakState::Running { started_at: 42 }).unwrap();
        assert_eq!(store.get(KEY_STREAK_STARTED_AT).unwrap().as_deref(), Some("42"));
        assert_eq!(load_streak(&store), StreakState::Running { started_at: 42 });

        save_streak(&mut store, &StreakState::Idle).unwrap();
        assert_eq!(store.get(KEY_STREAK_RUNNING).unwrap().as_deref(), Some("false"));
        assert!(store.get(KEY_STREAK_STARTED_AT).unwrap().is_none());
    }

    #[test]
    fn history_is_stored_as_wire_json() {
        let mut store = MemoryStore::new();
        let mut history = HistoryStore::new();
        history.append(HistoryEntry {
            id: "x1".into(),
            start_time: 10,
            end_time: 20,
            reason: "party".into(),
            setback_type: "Social".into(),
        });
        save_history(&mut store, &history).unwrap();
        let raw = store.get(KEY_HISTORY).unwrap().unwrap();
        assert_eq!(
            raw,
            r#"[{"id":"x1","startTime":10,"endTime":20,"reason":"party","type":"Social"}]"#
        );
        assert_eq!(load_history(&store), history);
    }

    #[test]
    fn custom_types_roundtrip() {
        let mut store = MemoryStore::new();
        let registry = SetbackTypeRegistry::with_custom(["Late night", "Payday"]);
        save_setback_types(&mut store, &registry).unwrap();
        assert_eq!(load_setback_types(&store), registry);
    }
}
