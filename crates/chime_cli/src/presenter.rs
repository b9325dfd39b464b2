//! Terminal presenter: the list surface, clock readout and alert cue.
//!
//! # Responsibility
//! - Mirror registration lifecycle onto stdout lines.
//! - Raise the firing alert as a terminal bell plus an acknowledgment
//!   prompt; the actual blocking wait lives in the event loop, which holds
//!   until the reader thread forwards the user's dismissal.

use chime_core::{AlarmId, AlarmTime, Presenter};

/// Terminal bell, rung once per firing alert.
const BELL: &str = "\x07";

#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    pub fn new() -> Self {
        Self
    }
}

impl Presenter for TerminalPresenter {
    fn render(&mut self, id: AlarmId, time: &AlarmTime) {
        println!("  + alarm set for {time}  (id {})", short_id(id));
    }

    fn remove(&mut self, id: AlarmId) {
        println!("  - alarm {} deleted", short_id(id));
    }

    fn alert(&mut self, id: AlarmId, time: &AlarmTime) {
        println!("{BELL}*** ALARM {time} *** (id {})  press Enter to dismiss", short_id(id));
    }

    fn show_clock(&mut self, now: &AlarmTime) {
        // Carriage return keeps the readout on one line between alerts.
        print!("\r{now}        ");
        use std::io::Write;
        let _ = std::io::stdout().flush();
    }
}

/// First uuid group; enough to disambiguate a handful of alarms.
pub fn short_id(id: AlarmId) -> String {
    id.to_string().chars().take(8).collect()
}
