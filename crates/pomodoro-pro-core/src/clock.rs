//! Calendar source for the day-boundary reset.
//!
//! The engine never asks the OS for the date directly so tests can roll the
//! day over without waiting for midnight.

use std::sync::{Arc, Mutex};

use chrono::{Local, NaiveDate};

pub trait Clock: Send + Sync {
    /// Today's date on the host's local calendar.
    fn today(&self) -> NaiveDate;
}

/// Reads the host clock in local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A settable clock. Clones share the same date.
#[derive(Debug, Clone)]
pub struct FixedClock {
    today: Arc<Mutex<NaiveDate>>,
}

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Arc::new(Mutex::new(today)),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(|e| e.into_inner()) = today;
    }

    /// Move the date forward by `days`.
    pub fn advance_days(&self, days: u64) {
        let mut guard = self.today.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = guard.checked_add_days(chrono::Days::new(days)) {
            *guard = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_clones_share_date() {
        let day = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        let clock = FixedClock::new(day);
        let other = clock.clone();
        clock.advance_days(1);
        assert_eq!(other.today(), NaiveDate::from_ymd_opt(2026, 10, 20).unwrap());
    }
}
