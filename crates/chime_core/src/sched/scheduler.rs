//! Alarm scheduler: registration set, tick matching and delete
//! coordination.
//!
//! # Responsibility
//! - Create, restore, fire and cancel alarm registrations.
//! - Keep the durable list in step with the live set on every user-driven
//!   mutation.
//!
//! # Invariants
//! - Registrations are keyed by `AlarmId`; the display string is never used
//!   as identity, so duplicate times coexist safely.
//! - A registration fires at most once: the first matching tick latches
//!   `Firing` and suppresses the comparison from then on. The entry stays
//!   listed until explicitly deleted.
//! - Restoration never writes back to the store.

use crate::model::alarm::{AlarmId, AlarmState, AlarmTime};
use crate::repo::alarm_store::{AlarmStore, StoreResult};
use log::{debug, info};
use uuid::Uuid;

/// Whether a newly scheduled alarm must be written to durable storage.
///
/// `Restore` is the startup path: the store already contains the entry, so
/// appending again would duplicate it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persist {
    Save,
    Restore,
}

/// One live alarm registration. Owned exclusively by the scheduler;
/// everything else routes by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub id: AlarmId,
    pub time: AlarmTime,
    pub state: AlarmState,
}

/// A registration whose time matched the clock on this tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlarmFired {
    pub id: AlarmId,
    pub time: AlarmTime,
}

/// Registration owner and tick-driven matcher.
///
/// Newest registrations sit at the front of the set, matching the
/// newest-first list surface.
pub struct Scheduler<S: AlarmStore> {
    store: S,
    entries: Vec<Registration>,
}

impl<S: AlarmStore> Scheduler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Registers a new alarm in `Pending` state.
    ///
    /// # Contract
    /// - With `Persist::Save` the entry is appended to the store first; a
    ///   store failure leaves the live set untouched.
    /// - With `Persist::Restore` storage is not written.
    pub fn schedule(&mut self, time: AlarmTime, persist: Persist) -> StoreResult<AlarmId> {
        if persist == Persist::Save {
            self.store.append(&time)?;
        }

        let id = Uuid::new_v4();
        info!(
            "event=alarm_schedule module=sched status=ok id={id} time={time} persist={persist:?}"
        );
        self.entries.insert(
            0,
            Registration {
                id,
                time,
                state: AlarmState::Pending,
            },
        );
        Ok(id)
    }

    /// Re-registers every persisted alarm without re-saving it.
    ///
    /// Returns the number of restored registrations. Entries the store
    /// already dropped as non-canonical never reach this point.
    pub fn restore(&mut self) -> usize {
        let times = self.store.load();
        let count = times.len();
        for time in times {
            // Restore never touches the store, so this cannot fail.
            let _ = self.schedule(time, Persist::Restore);
        }
        info!("event=alarm_restore module=sched status=ok count={count}");
        count
    }

    /// Compares every pending registration against `now`.
    ///
    /// First match moves a registration `Pending` -> `Firing` and reports
    /// it; later ticks on the same (or a recurring) matching second are
    /// suppressed. Storage is not touched by firing.
    pub fn tick(&mut self, now: &AlarmTime) -> Vec<AlarmFired> {
        let mut fired = Vec::new();
        for entry in &mut self.entries {
            if entry.state == AlarmState::Pending && &entry.time == now {
                entry.state = AlarmState::Firing;
                info!(
                    "event=alarm_fire module=sched status=ok id={} time={}",
                    entry.id, entry.time
                );
                fired.push(AlarmFired {
                    id: entry.id,
                    time: entry.time.clone(),
                });
            }
        }
        fired
    }

    /// Stops the check for one registration and drops it from the live set.
    ///
    /// Idempotent: an unknown or already-cancelled id returns `false`.
    pub fn cancel(&mut self, id: AlarmId) -> bool {
        let Some(index) = self.entries.iter().position(|entry| entry.id == id) else {
            debug!("event=alarm_cancel module=sched status=unknown id={id}");
            return false;
        };
        let mut entry = self.entries.remove(index);
        entry.state = AlarmState::Cancelled;
        info!(
            "event=alarm_cancel module=sched status=ok id={} time={}",
            entry.id, entry.time
        );
        true
    }

    /// Full user-delete path: cancel the check, then remove the entry's
    /// time from the store.
    ///
    /// Returns `Ok(false)` (a no-op) for an unknown id. Presentation
    /// teardown is the caller's third step, keeping the ordering: cancel,
    /// store removal, visual removal.
    pub fn delete(&mut self, id: AlarmId) -> StoreResult<bool> {
        let Some(entry) = self.entries.iter().find(|entry| entry.id == id) else {
            return Ok(false);
        };
        let time = entry.time.clone();

        self.cancel(id);
        self.store.remove(&time)?;
        Ok(true)
    }

    /// Deletes the newest live registration with a value-equal time.
    ///
    /// With duplicate times the surviving instance is whichever was
    /// scheduled earlier; storage loses one value-equal entry either way.
    pub fn delete_by_time(&mut self, time: &AlarmTime) -> StoreResult<Option<AlarmId>> {
        let Some(entry) = self.entries.iter().find(|entry| &entry.time == time) else {
            return Ok(None);
        };
        let id = entry.id;
        self.delete(id)?;
        Ok(Some(id))
    }

    /// Live registrations, newest first.
    pub fn alarms(&self) -> &[Registration] {
        &self.entries
    }

    pub fn get(&self, id: AlarmId) -> Option<&Registration> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing store access for callers that need direct reads.
    pub fn store(&self) -> &S {
        &self.store
    }
}
