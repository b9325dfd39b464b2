//! Alarm time and registration domain model.
//!
//! # Responsibility
//! - Provide the canonical `H:MM:SS AM|PM` time representation.
//! - Validate selector input and persisted strings against that shape.
//! - Define registration identity (`AlarmId`) and lifecycle (`AlarmState`).
//!
//! # Invariants
//! - `AlarmTime::from_parts` output is character-for-character identical to
//!   the clock source formatter for the same instant.
//! - Hour is rendered 1-12 without zero padding; minute and second are
//!   always two digits; the meridiem marker is upper-case.
//! - Duplicate `AlarmTime` values may coexist; identity is `AlarmId`, never
//!   the display string.

use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for one alarm registration.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type AlarmId = Uuid;

/// AM/PM half-day marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    /// Parses selector input case-insensitively (`am`, `AM`, `pm`, `PM`).
    pub fn parse(value: &str) -> Result<Self, AlarmTimeError> {
        match value.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Self::Am),
            "PM" => Ok(Self::Pm),
            other => Err(AlarmTimeError::InvalidMeridiem(other.to_string())),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Am => "AM",
            Self::Pm => "PM",
        }
    }
}

impl Display for Meridiem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation error for alarm time construction and parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlarmTimeError {
    HourOutOfRange(u32),
    ClockHourOutOfRange(u32),
    MinuteOutOfRange(u32),
    SecondOutOfRange(u32),
    InvalidMeridiem(String),
    Malformed(String),
}

impl Display for AlarmTimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(hour) => {
                write!(f, "hour must be 1-12, got {hour}")
            }
            Self::ClockHourOutOfRange(hour) => {
                write!(f, "clock hour must be 0-23, got {hour}")
            }
            Self::MinuteOutOfRange(minute) => {
                write!(f, "minute must be 0-59, got {minute}")
            }
            Self::SecondOutOfRange(second) => {
                write!(f, "second must be 0-59, got {second}")
            }
            Self::InvalidMeridiem(value) => {
                write!(f, "meridiem must be AM or PM, got `{value}`")
            }
            Self::Malformed(value) => {
                write!(f, "not a canonical alarm time: `{value}`")
            }
        }
    }
}

impl Error for AlarmTimeError {}

/// Canonical wall-clock alarm time, e.g. `7:05:00 AM`.
///
/// This is both the user-facing label and the storage/comparison key.
/// Construction always goes through validation, so a held `AlarmTime` is
/// guaranteed to be in the exact shape the clock source produces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AlarmTime(String);

impl AlarmTime {
    /// Builds an alarm time from the four selector values.
    ///
    /// # Contract
    /// - `hour` is 1-12, `minute` and `second` are 0-59.
    /// - Output matches the clock source formatter character-for-character.
    pub fn from_parts(
        hour: u32,
        minute: u32,
        second: u32,
        meridiem: Meridiem,
    ) -> Result<Self, AlarmTimeError> {
        if !(1..=12).contains(&hour) {
            return Err(AlarmTimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(AlarmTimeError::MinuteOutOfRange(minute));
        }
        if second > 59 {
            return Err(AlarmTimeError::SecondOutOfRange(second));
        }
        Ok(Self(compose(hour, minute, second, meridiem)))
    }

    /// Builds an alarm time from 24-hour clock components.
    ///
    /// Used by the clock source, which observes hours 0-23. Hour 0 maps to
    /// `12 AM`, hour 12 to `12 PM`.
    pub fn from_hms24(hour: u32, minute: u32, second: u32) -> Result<Self, AlarmTimeError> {
        if hour > 23 {
            return Err(AlarmTimeError::ClockHourOutOfRange(hour));
        }
        let meridiem = if hour < 12 { Meridiem::Am } else { Meridiem::Pm };
        let hour12 = match hour % 12 {
            0 => 12,
            h => h,
        };
        Self::from_parts(hour12, minute, second, meridiem)
    }

    /// Re-validates a persisted or user-typed string against the canonical
    /// shape.
    ///
    /// Strict by design: `07:05:00 AM` (padded hour), lower-case meridiem or
    /// missing padding are rejected, because such a string can never equal a
    /// clock source output and would silently never fire.
    pub fn parse(value: &str) -> Result<Self, AlarmTimeError> {
        let malformed = || AlarmTimeError::Malformed(value.to_string());

        let (clock_part, meridiem_part) = value.split_once(' ').ok_or_else(malformed)?;
        let meridiem = match meridiem_part {
            "AM" => Meridiem::Am,
            "PM" => Meridiem::Pm,
            _ => return Err(malformed()),
        };

        let mut fields = clock_part.split(':');
        let (hour, minute, second) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some(h), Some(m), Some(s), None) => (h, m, s),
            _ => return Err(malformed()),
        };

        // Hour is unpadded (1-2 digits, no leading zero); minute and second
        // are exactly two digits.
        if hour.is_empty() || hour.len() > 2 || hour.starts_with('0') {
            return Err(malformed());
        }
        if minute.len() != 2 || second.len() != 2 {
            return Err(malformed());
        }

        let hour: u32 = hour.parse().map_err(|_| malformed())?;
        let minute: u32 = minute.parse().map_err(|_| malformed())?;
        let second: u32 = second.parse().map_err(|_| malformed())?;

        Self::from_parts(hour, minute, second, meridiem).map_err(|_| malformed())
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for AlarmTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<AlarmTime> for String {
    fn from(value: AlarmTime) -> Self {
        value.0
    }
}

fn compose(hour: u32, minute: u32, second: u32, meridiem: Meridiem) -> String {
    format!("{hour}:{minute:02}:{second:02} {meridiem}")
}

/// Lifecycle state of one alarm registration.
///
/// `Pending` -> `Firing` on first clock match; `Cancelled` is terminal and
/// only reached through explicit deletion. A `Firing` registration stays
/// visible (and does not re-alert) until the user deletes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlarmState {
    /// Scheduled and checked each tick; time has not matched yet.
    Pending,
    /// Time matched at least once; alert has been raised.
    Firing,
    /// Check stopped by explicit deletion.
    Cancelled,
}
