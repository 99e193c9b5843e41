//! Key-value persistence port.
//!
//! The tracker never touches a storage technology directly; it goes through
//! [`KeyValueStore`]. [`MemoryStore`] backs tests, [`super::SqliteStore`]
//! backs the CLI.

use std::collections::HashMap;

use crate::error::PersistenceError;

/// Key holding `"true"` / `"false"`.
pub const KEY_STREAK_RUNNING: &str = "streak.running";
/// Key holding the running streak's start instant in epoch ms; absent when idle.
pub const KEY_STREAK_STARTED_AT: &str = "streak.started_at";
/// Key holding the JSON array of history entries, newest first.
pub const KEY_HISTORY: &str = "history";
/// Key holding the JSON array of user-added setback types.
pub const KEY_CUSTOM_TYPES: &str = "setback_types.custom";

/// String-keyed, string-valued store. A write is complete once the call
/// returns `Ok`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.values.remove(key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}
