//! Clock source abstraction and host implementations.
//!
//! # Responsibility
//! - Produce the current local time as a canonical `AlarmTime` per tick.
//! - Keep alarm comparisons and the display tick on one formatter.
//!
//! # Invariants
//! - `now()` always succeeds; there is no error path.
//! - Output is character-for-character the same shape as
//!   `AlarmTime::from_parts`, or scheduled alarms could never match.

use crate::model::alarm::AlarmTime;
use chrono::{Local, Timelike};
use std::cell::RefCell;

/// Source of the advancing wall clock.
///
/// Implementations must return monotonically non-decreasing times when
/// polled at or below one-second granularity; the scheduler relies on every
/// second value being observed at least once.
pub trait ClockSource {
    fn now(&self) -> AlarmTime;
}

/// Host clock backed by the system's local time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockSource for SystemClock {
    fn now(&self) -> AlarmTime {
        let now = Local::now();
        // chrono folds leap seconds into nanoseconds, so hour/minute/second
        // are always in range.
        AlarmTime::from_hms24(now.hour(), now.minute(), now.second())
            .expect("local clock components are in range")
    }
}

/// Deterministic clock for tests and headless drivers.
///
/// The reported time only advances when `set` is called, which lets a test
/// drive the scheduler through exact second buckets.
#[derive(Debug)]
pub struct ManualClock {
    now: RefCell<AlarmTime>,
}

impl ManualClock {
    pub fn new(start: AlarmTime) -> Self {
        Self {
            now: RefCell::new(start),
        }
    }

    /// Moves the clock to a new instant.
    pub fn set(&self, now: AlarmTime) {
        *self.now.borrow_mut() = now;
    }
}

impl ClockSource for ManualClock {
    fn now(&self) -> AlarmTime {
        self.now.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockSource, ManualClock, SystemClock};
    use crate::model::alarm::AlarmTime;

    #[test]
    fn system_clock_output_parses_as_canonical() {
        let now = SystemClock.now();
        let reparsed = AlarmTime::parse(now.as_str()).expect("clock output must be canonical");
        assert_eq!(reparsed, now);
    }

    #[test]
    fn manual_clock_reports_the_set_instant() {
        let clock = ManualClock::new(AlarmTime::parse("7:05:00 AM").unwrap());
        assert_eq!(clock.now().as_str(), "7:05:00 AM");

        clock.set(AlarmTime::parse("7:05:01 AM").unwrap());
        assert_eq!(clock.now().as_str(), "7:05:01 AM");
    }
}
