//! Timer engine implementation.
//!
//! The timer engine is a tick-driven state machine. It does not use internal
//! threads or timers - the caller is responsible for calling `tick()` once a
//! second while the engine is running, and `flush()` on its autosave cadence.
//!
//! ## State Transitions
//!
//! ```text
//! Idle --start--> Active --pause--> Idle
//! Active --tick (time runs out)--> Idle (next mode loaded)
//! any --reset / set_mode--> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(Durations::default(), store)?;
//! engine.start();
//! // Once per second:
//! engine.tick(); // Returns Some(Event::SessionCompleted) when the interval ends
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::mode::{Durations, Mode};
use crate::error::ConfigError;
use crate::events::Event;
use crate::notify::NotificationSink;
use crate::stats::{SessionStats, StatsStore};

/// The countdown for the current interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub mode: Mode,
    pub time_left_secs: u64,
    /// Length of the current interval, fixed when it was loaded.
    pub total_secs: u64,
    pub running: bool,
}

impl TimerState {
    fn idle(mode: Mode, durations: &Durations) -> Self {
        let total = durations.of(mode);
        Self {
            mode,
            time_left_secs: total,
            total_secs: total,
            running: false,
        }
    }
}

/// Core timer engine.
///
/// Owns the countdown and today's stats. Nothing else mutates either;
/// collaborators read through the query methods and observe changes through
/// returned events and registered [`NotificationSink`]s.
pub struct TimerEngine {
    durations: Durations,
    state: TimerState,
    stats: SessionStats,
    store: StatsStore,
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl TimerEngine {
    /// Create an idle engine on a fresh focus interval and load today's stats.
    ///
    /// # Errors
    /// Returns an error if any duration (or the long-break cadence) is zero.
    pub fn new(durations: Durations, store: StatsStore) -> Result<Self, ConfigError> {
        durations.validate()?;
        let stats = store.load();
        debug!(?stats, "timer engine ready");
        Ok(Self {
            state: TimerState::idle(Mode::Focus, &durations),
            durations,
            stats,
            store,
            sinks: Vec::new(),
        })
    }

    pub fn with_sink(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn current_mode(&self) -> Mode {
        self.state.mode
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.state.time_left_secs
    }

    pub fn total_seconds(&self) -> u64 {
        self.state.total_secs
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    /// 0.0 .. 1.0 progress within the current interval.
    pub fn progress_fraction(&self) -> f64 {
        let total = self.state.total_secs;
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.time_left_secs);
        elapsed as f64 / total as f64
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn session_count(&self) -> u64 {
        self.stats.session_count
    }

    pub fn completed_sessions(&self) -> u64 {
        self.stats.completed_sessions
    }

    pub fn total_time_spent_seconds(&self) -> u64 {
        self.stats.total_time_spent_secs
    }

    pub fn streak_count(&self) -> u64 {
        self.stats.streak_count
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            mode: self.state.mode,
            running: self.state.running,
            remaining_secs: self.state.time_left_secs,
            total_secs: self.state.total_secs,
            progress: self.progress_fraction(),
            stats: self.stats,
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        if self.state.running {
            return None;
        }
        self.state.running = true;
        debug!(mode = %self.state.mode, remaining = self.state.time_left_secs, "timer started");
        Some(Event::TimerStarted {
            mode: self.state.mode,
            remaining_secs: self.state.time_left_secs,
            at: Utc::now(),
        })
    }

    pub fn pause(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.running = false;
        debug!(mode = %self.state.mode, remaining = self.state.time_left_secs, "timer paused");
        Some(Event::TimerPaused {
            mode: self.state.mode,
            remaining_secs: self.state.time_left_secs,
            at: Utc::now(),
        })
    }

    /// Start if idle, pause if running.
    pub fn toggle_timer(&mut self) -> Option<Event> {
        if self.state.running {
            self.pause()
        } else {
            self.start()
        }
    }

    /// Stop and rewind the current interval. Stats are untouched.
    pub fn reset_timer(&mut self) -> Event {
        self.state = TimerState::idle(self.state.mode, &self.durations);
        debug!(mode = %self.state.mode, "timer reset");
        for sink in &self.sinks {
            if let Err(e) = sink.on_reset() {
                warn!(error = %e, "notification sink failed on reset");
            }
        }
        Event::TimerReset {
            mode: self.state.mode,
            duration_secs: self.state.total_secs,
            at: Utc::now(),
        }
    }

    /// Stop and load a fresh interval of `mode`.
    ///
    /// Progress on the abandoned interval is discarded, not credited.
    pub fn set_mode(&mut self, mode: Mode) -> Event {
        self.state = TimerState::idle(mode, &self.durations);
        debug!(%mode, "mode set");
        Event::ModeChanged {
            mode,
            duration_secs: self.state.total_secs,
            at: Utc::now(),
        }
    }

    /// Focus goes to Break; either break goes to Focus.
    pub fn toggle_mode(&mut self) -> Event {
        self.set_mode(self.state.mode.toggled())
    }

    /// Call once per second. Returns `Some(Event::SessionCompleted)` when the
    /// interval runs out. Does nothing while idle.
    pub fn tick(&mut self) -> Option<Event> {
        if !self.state.running {
            return None;
        }
        self.state.time_left_secs = self.state.time_left_secs.saturating_sub(1);
        if self.state.time_left_secs == 0 {
            return Some(self.complete_session());
        }
        None
    }

    /// Persist the current stats. Failures are logged and dropped.
    pub fn flush(&mut self) {
        match self.store.save(&self.stats) {
            Ok(written) => self.stats = written,
            Err(e) => warn!(error = %e, "could not save stats"),
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn complete_session(&mut self) -> Event {
        let ended = self.state.mode;
        self.state.running = false;

        for sink in &self.sinks {
            if let Err(e) = sink.on_session_complete(ended) {
                warn!(error = %e, mode = %ended, "notification sink failed on completion");
            }
        }

        let next = match ended {
            Mode::Focus => {
                self.stats.credit_focus(self.durations.focus_secs);
                if self.stats.completed_sessions % self.durations.long_break_every == 0 {
                    Mode::LongBreak
                } else {
                    Mode::Break
                }
            }
            Mode::Break | Mode::LongBreak => Mode::Focus,
        };
        info!(
            mode = %ended,
            next = %next,
            completed = self.stats.completed_sessions,
            streak = self.stats.streak_count,
            "session completed"
        );

        self.set_mode(next);
        self.flush();

        Event::SessionCompleted {
            mode: ended,
            next_mode: next,
            stats: self.stats,
            at: Utc::now(),
        }
    }
}
