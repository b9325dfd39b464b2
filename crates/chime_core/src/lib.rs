//! Core domain logic for Chime, a persistent alarm clock.
//! This crate is the single source of truth for alarm lifecycle invariants.

pub mod clock;
pub mod logging;
pub mod model;
pub mod present;
pub mod repo;
pub mod sched;

pub use clock::{ClockSource, ManualClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::alarm::{AlarmId, AlarmState, AlarmTime, AlarmTimeError, Meridiem};
pub use present::{Presenter, PresenterEvent, RecordingPresenter};
pub use repo::alarm_store::{AlarmStore, JsonFileStore, MemoryStore, StoreError, StoreResult};
pub use sched::event_loop::{Command, EventLoop, StepOutcome, TICK_INTERVAL};
pub use sched::scheduler::{AlarmFired, Persist, Registration, Scheduler};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
