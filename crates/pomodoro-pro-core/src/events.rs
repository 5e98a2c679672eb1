use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::SessionStats;
use crate::timer::Mode;

/// Every state change of the timer produces an Event.
/// The host prints or forwards them; notification sinks get the subset
/// they care about through [`crate::NotificationSink`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        mode: Mode,
        remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    ModeChanged {
        mode: Mode,
        duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// An interval ran out. `next_mode` is already loaded and idle.
    SessionCompleted {
        mode: Mode,
        next_mode: Mode,
        stats: SessionStats,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: Mode,
        running: bool,
        remaining_secs: u64,
        total_secs: u64,
        progress: f64,
        stats: SessionStats,
        at: DateTime<Utc>,
    },
}
