use std::io::Write;

use pomodoro_pro_core::{Mode, NotificationSink, SinkError};

/// Prints completion and reset notices to stderr.
pub struct TerminalSink {
    pub bell: bool,
}

impl NotificationSink for TerminalSink {
    fn on_session_complete(&self, mode: Mode) -> Result<(), SinkError> {
        let bell = if self.bell { "\x07" } else { "" };
        let mut err = std::io::stderr().lock();
        writeln!(err, "\n{bell}{}", mode.completion_message())?;
        Ok(())
    }

    fn on_reset(&self) -> Result<(), SinkError> {
        let mut err = std::io::stderr().lock();
        writeln!(err, "\nTimer reset")?;
        Ok(())
    }
}
