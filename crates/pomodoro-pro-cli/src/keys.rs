//! Keyboard commands for the interactive loop.
//!
//! Input is read a line at a time, so "space" is an empty line (just Enter).

use pomodoro_pro_core::Mode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Toggle,
    Reset,
    SetMode(Mode),
    ToggleMode,
    Status,
    Help,
    Quit,
}

impl Key {
    pub fn parse(line: &str) -> Option<Key> {
        let key = match line.trim().to_ascii_lowercase().as_str() {
            "" | "t" | "space" | "toggle" => Key::Toggle,
            "r" | "reset" => Key::Reset,
            "f" | "focus" => Key::SetMode(Mode::Focus),
            "b" | "break" => Key::SetMode(Mode::Break),
            "l" | "long" | "longbreak" => Key::SetMode(Mode::LongBreak),
            "m" | "mode" => Key::ToggleMode,
            "s" | "status" => Key::Status,
            "h" | "?" | "help" => Key::Help,
            "q" | "quit" | "exit" => Key::Quit,
            _ => return None,
        };
        Some(key)
    }
}

pub const HELP: &str = "\
keys: <enter>/t toggle  r reset  f focus  b break  l long break  m switch mode  s status  q quit";
