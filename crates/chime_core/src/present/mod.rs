//! Presentation adapter contract.
//!
//! # Responsibility
//! - Define the surface the scheduler/event loop drives: list entries, the
//!   live clock readout and the firing alert.
//! - Keep core decoupled from any concrete front-end; the terminal
//!   implementation lives in the CLI crate.
//!
//! # Invariants
//! - Entries are keyed by `AlarmId`, never by the display string, so
//!   duplicate alarm times stay independently deletable.
//! - The presenter never owns registration lifecycle; it only mirrors it.

use crate::model::alarm::{AlarmId, AlarmTime};

/// Output surface for alarm state changes.
///
/// `render`/`remove` mirror registration create/delete; `alert` is the
/// firing side effect (audible cue plus user acknowledgment, which may
/// block the event loop until dismissed); `show_clock` is the once-per-
/// second display tick.
pub trait Presenter {
    /// Shows a new list entry at the top of the visible list.
    fn render(&mut self, id: AlarmId, time: &AlarmTime);
    /// Tears down the entry for one registration.
    fn remove(&mut self, id: AlarmId);
    /// Raises the firing alert for one registration.
    fn alert(&mut self, id: AlarmId, time: &AlarmTime);
    /// Updates the live clock readout.
    fn show_clock(&mut self, now: &AlarmTime);
}

/// One observed presenter call, in order of occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresenterEvent {
    Rendered(AlarmId, AlarmTime),
    Removed(AlarmId),
    Alerted(AlarmId, AlarmTime),
    ClockShown(AlarmTime),
}

/// Presenter that records every call. Test double for lifecycle assertions.
#[derive(Debug, Default)]
pub struct RecordingPresenter {
    events: Vec<PresenterEvent>,
}

impl RecordingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All observed events, oldest first.
    pub fn events(&self) -> &[PresenterEvent] {
        &self.events
    }

    /// Count of `Alerted` events for one registration.
    pub fn alert_count(&self, id: AlarmId) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PresenterEvent::Alerted(fired, _) if *fired == id))
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn render(&mut self, id: AlarmId, time: &AlarmTime) {
        self.events.push(PresenterEvent::Rendered(id, time.clone()));
    }

    fn remove(&mut self, id: AlarmId) {
        self.events.push(PresenterEvent::Removed(id));
    }

    fn alert(&mut self, id: AlarmId, time: &AlarmTime) {
        self.events.push(PresenterEvent::Alerted(id, time.clone()));
    }

    fn show_clock(&mut self, now: &AlarmTime) {
        self.events.push(PresenterEvent::ClockShown(now.clone()));
    }
}
