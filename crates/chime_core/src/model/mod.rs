//! Domain model for scheduled alarms.
//!
//! # Responsibility
//! - Define the canonical alarm time representation shared by clock,
//!   store and scheduler.
//! - Define registration identity and lifecycle state.
//!
//! # Invariants
//! - Every live registration is identified by a stable `AlarmId`.
//! - `AlarmTime` is the single comparison and storage key format; any
//!   deviation from the canonical shape can never match the clock.

pub mod alarm;
