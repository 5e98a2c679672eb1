mod engine;
mod mode;

pub use engine::{TimerEngine, TimerState};
pub use mode::{
    Durations, Mode, DEFAULT_BREAK_SECS, DEFAULT_FOCUS_SECS, DEFAULT_LONG_BREAK_EVERY,
    DEFAULT_LONG_BREAK_SECS,
};
