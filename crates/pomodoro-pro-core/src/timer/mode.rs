use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Focus,
    Break,
    LongBreak,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Focus, Mode::Break, Mode::LongBreak];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Focus => "focus",
            Mode::Break => "break",
            Mode::LongBreak => "longbreak",
        }
    }

    /// Human-readable label shown next to the countdown.
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus Time",
            Mode::Break => "Short Break",
            Mode::LongBreak => "Long Break",
        }
    }

    /// Message shown when an interval of this mode runs out.
    pub fn completion_message(&self) -> &'static str {
        match self {
            Mode::Focus => "Focus session completed! Time for a well-deserved break.",
            Mode::Break => "Break time over! Ready to focus again?",
            Mode::LongBreak => "Long break completed! You've earned this achievement!",
        }
    }

    /// Mode selected by the plain focus/break toggle.
    ///
    /// Long breaks are never a toggle target; leaving one goes back to focus.
    pub fn toggled(&self) -> Mode {
        match self {
            Mode::Focus => Mode::Break,
            Mode::Break | Mode::LongBreak => Mode::Focus,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "focus" | "f" => Ok(Mode::Focus),
            "break" | "short-break" | "short_break" | "b" => Ok(Mode::Break),
            "longbreak" | "long-break" | "long_break" | "l" => Ok(Mode::LongBreak),
            other => Err(format!("unknown mode: {other}")),
        }
    }
}

pub const DEFAULT_FOCUS_SECS: u64 = 25 * 60;
pub const DEFAULT_BREAK_SECS: u64 = 5 * 60;
pub const DEFAULT_LONG_BREAK_SECS: u64 = 15 * 60;
pub const DEFAULT_LONG_BREAK_EVERY: u64 = 4;

/// Interval lengths in seconds, plus the long-break cadence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub focus_secs: u64,
    pub break_secs: u64,
    pub long_break_secs: u64,
    /// A long break follows every `long_break_every`-th completed focus session.
    pub long_break_every: u64,
}

impl Durations {
    pub fn new(focus_secs: u64, break_secs: u64, long_break_secs: u64) -> Self {
        Self {
            focus_secs,
            break_secs,
            long_break_secs,
            long_break_every: DEFAULT_LONG_BREAK_EVERY,
        }
    }

    pub fn of(&self, mode: Mode) -> u64 {
        match mode {
            Mode::Focus => self.focus_secs,
            Mode::Break => self.break_secs,
            Mode::LongBreak => self.long_break_secs,
        }
    }

    /// Every mode needs a positive duration and the cadence must be positive.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for mode in Mode::ALL {
            let secs = self.of(mode);
            if secs == 0 {
                return Err(ConfigError::InvalidDuration { mode, secs });
            }
        }
        if self.long_break_every == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.long_break_every".into(),
                message: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::new(DEFAULT_FOCUS_SECS, DEFAULT_BREAK_SECS, DEFAULT_LONG_BREAK_SECS)
    }
}
