//! Daily session statistics and their persistence.
//!
//! The record lives under a single key as a small JSON object. Counters are
//! per-day: a record saved on another calendar day loads as a fresh day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::error::StorageError;
use crate::storage::KeyValueStore;

/// Key the stats record is stored under.
pub const STATS_KEY: &str = "pomodoroProData";

/// Date format of `lastSaveDate`, e.g. `Mon Oct 19 2026`.
const DATE_FORMAT: &str = "%a %b %d %Y";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    /// Ordinal of the current/next focus session today. Starts at 1.
    pub session_count: u64,
    pub completed_sessions: u64,
    pub total_time_spent_secs: u64,
    /// Consecutive completed focus sessions; only a new day clears it.
    pub streak_count: u64,
    pub last_save_date: NaiveDate,
}

impl SessionStats {
    /// A fresh day.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            session_count: 1,
            completed_sessions: 0,
            total_time_spent_secs: 0,
            streak_count: 0,
            last_save_date: today,
        }
    }

    pub(crate) fn credit_focus(&mut self, focus_secs: u64) {
        self.completed_sessions = self.completed_sessions.saturating_add(1);
        self.streak_count = self.streak_count.saturating_add(1);
        self.total_time_spent_secs = self.total_time_spent_secs.saturating_add(focus_secs);
        self.session_count = self.session_count.saturating_add(1);
    }
}

/// On-disk shape of the record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsRecord {
    completed_sessions: u64,
    /// Seconds.
    total_time_spent: u64,
    streak_count: u64,
    session_count: u64,
    last_save_date: String,
}

impl From<&SessionStats> for StatsRecord {
    fn from(stats: &SessionStats) -> Self {
        Self {
            completed_sessions: stats.completed_sessions,
            total_time_spent: stats.total_time_spent_secs,
            streak_count: stats.streak_count,
            session_count: stats.session_count,
            last_save_date: format_date(stats.last_save_date),
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d"))
        .ok()
}

/// A non-negative whole number, whether stored as `3` or `3.0`.
fn as_count(value: &serde_json::Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f < u64::MAX as f64)
            .map(|f| f as u64)
    })
}

/// Decode a stored record relative to `today`.
///
/// Returns `None` when the text is not a JSON object at all. Individual
/// fields that are missing or malformed fall back to their defaults.
fn decode(raw: &str, today: NaiveDate) -> Option<SessionStats> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let obj = value.as_object()?;

    let count = |name: &str| obj.get(name).and_then(as_count);
    let stored_date = obj
        .get("lastSaveDate")
        .and_then(serde_json::Value::as_str)
        .and_then(parse_date);

    if stored_date != Some(today) {
        debug!(?stored_date, %today, "stats record is from another day, starting fresh");
        return Some(SessionStats::new(stored_date.unwrap_or(today)));
    }

    Some(SessionStats {
        session_count: count("sessionCount").filter(|&n| n > 0).unwrap_or(1),
        completed_sessions: count("completedSessions").unwrap_or(0),
        total_time_spent_secs: count("totalTimeSpent").unwrap_or(0),
        streak_count: count("streakCount").unwrap_or(0),
        last_save_date: today,
    })
}

/// Loads and saves [`SessionStats`] through a [`KeyValueStore`].
pub struct StatsStore {
    backend: Box<dyn KeyValueStore>,
    clock: Box<dyn Clock>,
}

impl StatsStore {
    pub fn new(backend: impl KeyValueStore + 'static, clock: impl Clock + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            clock: Box::new(clock),
        }
    }

    /// Read today's stats.
    ///
    /// Never fails: an unreadable backend or a corrupt record yields a fresh
    /// day. A record from another day keeps its stored date until the next
    /// save but has every counter reset.
    pub fn load(&self) -> SessionStats {
        let today = self.clock.today();
        let raw = match self.backend.get(STATS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return SessionStats::new(today),
            Err(e) => {
                warn!(error = %e, "could not read stats, starting fresh");
                return SessionStats::new(today);
            }
        };

        match decode(&raw, today) {
            Some(stats) => stats,
            None => {
                warn!("stored stats record is malformed, starting fresh");
                SessionStats::new(today)
            }
        }
    }

    /// Write `stats` stamped with today's date, replacing any prior record.
    ///
    /// Returns the record as written.
    pub fn save(&self, stats: &SessionStats) -> Result<SessionStats, StorageError> {
        let stamped = SessionStats {
            last_save_date: self.clock.today(),
            ..*stats
        };
        let json = serde_json::to_string(&StatsRecord::from(&stamped))?;
        self.backend.set(STATS_KEY, &json)?;
        Ok(stamped)
    }

    /// Drop the persisted record entirely.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.delete(STATS_KEY)
    }
}
