//! Persistence layer contracts and implementations.
//!
//! # Responsibility
//! - Define the durable alarm-list access contract.
//! - Isolate file/JSON details from scheduler orchestration.
//!
//! # Invariants
//! - The persisted list is read wholesale and written wholesale; there are
//!   no partial updates.
//! - Reads never fail the caller: absent or corrupt data degrades to an
//!   empty list.

pub mod alarm_store;
