//! # Pomodoro Pro Core Library
//!
//! This library provides the core logic for the Pomodoro Pro timer. The
//! `pomodoro-pro` CLI is a thin host over it: it owns one engine, drives the
//! tick and autosave cadences, and renders events.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A tick-driven state machine over focus, break and
//!   long-break intervals. The caller invokes `tick()` once per second.
//! - **Stats**: Per-day session counters with a day-boundary reset, persisted
//!   as a single JSON record in a key-value store.
//! - **Storage**: SQLite key-value store and TOML-based configuration.
//! - **Notifications**: Observer trait for sound/visual collaborators.
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`StatsStore`]: Stats persistence with day rollover
//! - [`Database`]: SQLite-backed [`KeyValueStore`]
//! - [`Config`]: Application configuration management
//! - [`NotificationSink`]: Completion and reset observers

pub mod clock;
pub mod display;
pub mod error;
pub mod events;
pub mod notify;
pub mod stats;
pub mod storage;
pub mod timer;

pub use clock::{Clock, SystemClock};
pub use error::{ConfigError, StorageError};
pub use events::Event;
pub use notify::{Notification, NotificationSink, SinkError};
pub use stats::{SessionStats, StatsStore, STATS_KEY};
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use timer::{Durations, Mode, TimerEngine, TimerState};
