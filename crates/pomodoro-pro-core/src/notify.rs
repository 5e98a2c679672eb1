//! Observer interface for sound and visual notifications.
//!
//! The engine calls sinks after the state change has been applied. A sink
//! that fails is logged and skipped; it can never roll back or stall the
//! timer.

use std::sync::{Arc, Mutex};

use crate::timer::Mode;

pub type SinkError = Box<dyn std::error::Error + Send + Sync>;

pub trait NotificationSink: Send {
    /// An interval of `mode` just ran out.
    fn on_session_complete(&self, mode: Mode) -> Result<(), SinkError>;

    /// The current interval was reset by the user.
    fn on_reset(&self) -> Result<(), SinkError>;
}

/// What a [`RecordingSink`] has been told.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    SessionComplete(Mode),
    Reset,
}

/// Sink that remembers every notification. Clones share the log.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    seen: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn push(&self, n: Notification) {
        self.seen.lock().unwrap_or_else(|e| e.into_inner()).push(n);
    }
}

impl NotificationSink for RecordingSink {
    fn on_session_complete(&self, mode: Mode) -> Result<(), SinkError> {
        self.push(Notification::SessionComplete(mode));
        Ok(())
    }

    fn on_reset(&self) -> Result<(), SinkError> {
        self.push(Notification::Reset);
        Ok(())
    }
}
