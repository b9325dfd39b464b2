//! Single-threaded event loop driving clock display and alarm ticks.
//!
//! # Responsibility
//! - Poll the clock at sub-second cadence and tick the scheduler.
//! - Drain the command queue, the only external mutation point while the
//!   loop runs.
//! - Route fired alarms to the presenter's alert surface and hold the loop
//!   until each alert is acknowledged.
//!
//! # Invariants
//! - All state mutation happens on the loop thread; producers only send
//!   commands.
//! - Commands received while an alert blocks are deferred, not lost, and
//!   run immediately after dismissal.

use crate::clock::ClockSource;
use crate::model::alarm::{AlarmId, AlarmTime};
use crate::present::Presenter;
use crate::repo::alarm_store::AlarmStore;
use crate::sched::scheduler::{AlarmFired, Persist, Scheduler};
use log::{error, info};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::thread;
use std::time::Duration;

/// Comparison tick cadence. Display updates ride the same loop but only
/// repaint when the formatted second changes.
pub const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// External requests into the running loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Schedule a new alarm and persist it.
    Schedule(AlarmTime),
    /// Delete one registration by id.
    Delete(AlarmId),
    /// Delete the newest registration matching a time value.
    DeleteByTime(AlarmTime),
    /// Dismiss the currently blocking alert.
    Ack,
    /// Stop the loop.
    Shutdown,
}

/// Result of one loop iteration, exposed for deterministic tests.
#[derive(Debug, Default)]
pub struct StepOutcome {
    pub shutdown: bool,
    pub fired: Vec<AlarmFired>,
}

/// The application loop: scheduler, clock, presenter and command queue,
/// all constructor-injected.
pub struct EventLoop<S: AlarmStore, C: ClockSource, P: Presenter> {
    scheduler: Scheduler<S>,
    clock: C,
    presenter: P,
    commands: Receiver<Command>,
    deferred: Vec<Command>,
    last_shown: Option<AlarmTime>,
}

impl<S: AlarmStore, C: ClockSource, P: Presenter> EventLoop<S, C, P> {
    pub fn new(scheduler: Scheduler<S>, clock: C, presenter: P, commands: Receiver<Command>) -> Self {
        Self {
            scheduler,
            clock,
            presenter,
            commands,
            deferred: Vec::new(),
            last_shown: None,
        }
    }

    /// Restores persisted alarms and renders each restored entry.
    pub fn restore(&mut self) -> usize {
        let count = self.scheduler.restore();
        // Registrations sit newest-first; render back-to-front so the
        // presenter sees the same insert-at-top order as live scheduling.
        let snapshot: Vec<_> = self
            .scheduler
            .alarms()
            .iter()
            .rev()
            .map(|reg| (reg.id, reg.time.clone()))
            .collect();
        for (id, time) in snapshot {
            self.presenter.render(id, &time);
        }
        count
    }

    /// Runs until a `Shutdown` command arrives or all producers hang up
    /// while an alert waits for acknowledgment.
    pub fn run(&mut self) {
        info!("event=loop_start module=sched status=ok");
        loop {
            let now = self.clock.now();
            let outcome = self.step(&now);
            if outcome.shutdown {
                break;
            }
            // One acknowledgment per fired alarm, in firing order.
            for _ in 0..outcome.fired.len() {
                if !self.wait_for_ack() {
                    info!("event=loop_stop module=sched status=ok reason=ack_channel_closed");
                    return;
                }
            }
            thread::sleep(TICK_INTERVAL);
        }
        info!("event=loop_stop module=sched status=ok reason=shutdown");
    }

    /// One loop iteration against an explicit `now`: drain commands, repaint
    /// the clock when the second changed, tick the scheduler and alert for
    /// every fired registration.
    ///
    /// Does not block on acknowledgment; `run` layers that on top.
    pub fn step(&mut self, now: &AlarmTime) -> StepOutcome {
        let mut outcome = StepOutcome::default();

        let deferred: Vec<Command> = self.deferred.drain(..).collect();
        for command in deferred {
            if self.apply(command) {
                outcome.shutdown = true;
            }
        }
        loop {
            match self.commands.try_recv() {
                Ok(command) => {
                    if self.apply(command) {
                        outcome.shutdown = true;
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        if outcome.shutdown {
            return outcome;
        }

        if self.last_shown.as_ref() != Some(now) {
            self.presenter.show_clock(now);
            self.last_shown = Some(now.clone());
        }

        outcome.fired = self.scheduler.tick(now);
        for fired in &outcome.fired {
            self.presenter.alert(fired.id, &fired.time);
        }
        outcome
    }

    /// Applies one command. Returns `true` for `Shutdown`.
    fn apply(&mut self, command: Command) -> bool {
        match command {
            Command::Schedule(time) => match self.scheduler.schedule(time.clone(), Persist::Save) {
                Ok(id) => self.presenter.render(id, &time),
                Err(err) => {
                    error!("event=alarm_schedule module=sched status=error time={time} error={err}");
                }
            },
            Command::Delete(id) => match self.scheduler.delete(id) {
                Ok(true) => self.presenter.remove(id),
                Ok(false) => {}
                Err(err) => {
                    error!("event=alarm_delete module=sched status=error id={id} error={err}");
                }
            },
            Command::DeleteByTime(time) => match self.scheduler.delete_by_time(&time) {
                Ok(Some(id)) => self.presenter.remove(id),
                Ok(None) => {}
                Err(err) => {
                    error!("event=alarm_delete module=sched status=error time={time} error={err}");
                }
            },
            // A stray acknowledgment with no alert on screen is dropped.
            Command::Ack => {}
            Command::Shutdown => return true,
        }
        false
    }

    /// Blocks until the user dismisses the current alert.
    ///
    /// Non-ack commands arriving during the block are deferred to the next
    /// `step`, mirroring timer callbacks queuing up behind a blocking
    /// dialog. Returns `false` when the loop should stop instead.
    fn wait_for_ack(&mut self) -> bool {
        loop {
            match self.commands.recv() {
                Ok(Command::Ack) => return true,
                Ok(Command::Shutdown) => return false,
                Ok(other) => self.deferred.push(other),
                Err(_) => return false,
            }
        }
    }

    pub fn scheduler(&self) -> &Scheduler<S> {
        &self.scheduler
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }
}
