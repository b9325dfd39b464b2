//! Alarm lifecycle orchestration.
//!
//! # Responsibility
//! - Own the live registration set and its tick-driven matching.
//! - Model the host's timer-callback world as one explicit event loop with
//!   a command queue.
//!
//! # Invariants
//! - All registration mutation goes through `Scheduler`; the event loop's
//!   command queue is the only external mutation point while running.
//! - Registration, presentation entry and storage entry for one alarm are
//!   kept consistent by the ordered delete sequence (cancel, then store
//!   removal, then presentation teardown).

pub mod event_loop;
pub mod scheduler;
