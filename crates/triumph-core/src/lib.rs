//! # Triumph Core Library
//!
//! This library provides the core logic for Triumph, a streak tracker for
//! breaking a habit. It follows a CLI-first philosophy: every operation is
//! available through the standalone `triumph-cli` binary, and any GUI is a
//! thin layer over the same library.
//!
//! ## Architecture
//!
//! - **Streak**: a pure `Idle`/`Running` state machine driven by a supplied clock
//! - **History**: newest-first record of past streaks ("setbacks")
//! - **Setback types**: built-in and user categories for setbacks
//! - **Analytics**: elapsed time, success rate and trend, plus period reports
//! - **Coach**: classifier port with timeout, fallback and stale-response guard
//! - **Storage**: key-value persistence port (SQLite or in-memory) and TOML config
//!
//! ## Key Components
//!
//! - [`Tracker`]: the effectful shell that persists every mutation
//! - [`analyze`]: pure analytics over history and streak state
//! - [`Coach`]: coaching message refresh
//! - [`SqliteStore`]: on-disk key-value store
//! - [`Config`]: application configuration management

pub mod analytics;
pub mod clock;
pub mod coach;
pub mod error;
pub mod events;
pub mod history;
pub mod setback_types;
pub mod storage;
pub mod streak;
pub mod tracker;

pub use analytics::{analyze, AnalyticsSnapshot, Trend};
pub use clock::{Clock, EpochMs, ManualClock, SystemClock};
pub use coach::{Coach, CoachMessage, ConfiguredClassifier, MessageBoard, Sentiment, SentimentClassifier};
pub use error::{ClassifierError, ConfigError, CoreError, PersistenceError, ProtectedTypeError, StateError, ValidationError};
pub use events::Event;
pub use history::{HistoryEntry, HistoryStore};
pub use setback_types::{SetbackTypeRegistry, DEFAULT_SETBACK_TYPES};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use streak::StreakState;
pub use tracker::Tracker;
