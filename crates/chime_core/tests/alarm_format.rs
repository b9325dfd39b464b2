//! Format round-trip law: selector input, clock output and persisted
//! strings all agree character-for-character.

use chime_core::{AlarmTime, Meridiem};
use chrono::NaiveTime;

fn to_hour24(hour12: u32, meridiem: Meridiem) -> u32 {
    match (hour12, meridiem) {
        (12, Meridiem::Am) => 0,
        (12, Meridiem::Pm) => 12,
        (h, Meridiem::Am) => h,
        (h, Meridiem::Pm) => h + 12,
    }
}

#[test]
fn selector_input_equals_clock_formatter_for_every_hour() {
    for meridiem in [Meridiem::Am, Meridiem::Pm] {
        for hour in 1..=12 {
            for (minute, second) in [(0, 0), (5, 0), (9, 59), (59, 1)] {
                let from_selectors =
                    AlarmTime::from_parts(hour, minute, second, meridiem).unwrap();
                let from_clock =
                    AlarmTime::from_hms24(to_hour24(hour, meridiem), minute, second).unwrap();
                assert_eq!(
                    from_selectors, from_clock,
                    "selector {hour}:{minute:02}:{second:02} {meridiem} diverged from clock"
                );
            }
        }
    }
}

#[test]
fn clock_formatter_matches_chrono_twelve_hour_rendering() {
    for (hour24, minute, second) in [
        (0, 0, 0),
        (0, 30, 59),
        (7, 5, 0),
        (11, 59, 59),
        (12, 0, 0),
        (13, 1, 2),
        (23, 59, 59),
    ] {
        let ours = AlarmTime::from_hms24(hour24, minute, second).unwrap();
        let reference = NaiveTime::from_hms_opt(hour24, minute, second)
            .unwrap()
            .format("%-I:%M:%S %p")
            .to_string();
        assert_eq!(ours.as_str(), reference);
    }
}

#[test]
fn parse_accepts_every_formatter_output() {
    for hour24 in 0..24 {
        let produced = AlarmTime::from_hms24(hour24, 7, 3).unwrap();
        let reparsed = AlarmTime::parse(produced.as_str()).unwrap();
        assert_eq!(reparsed, produced);
    }
}

#[test]
fn non_canonical_strings_never_round_trip() {
    // A zero-padded hour is the classic silent-never-fires bug: the clock
    // will never produce it, so it must not validate either.
    assert!(AlarmTime::parse("07:05:00 AM").is_err());
}
