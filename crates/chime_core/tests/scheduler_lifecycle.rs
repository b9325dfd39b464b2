//! Scheduler lifecycle: restoration, deletion, duplicates and the
//! end-to-end fire path.

use chime_core::{AlarmState, AlarmStore, AlarmTime, MemoryStore, Persist, Scheduler};

fn time(value: &str) -> AlarmTime {
    AlarmTime::parse(value).unwrap()
}

#[test]
fn restore_rebuilds_registrations_without_reappending() {
    let store = MemoryStore::new();
    {
        let mut first_session = Scheduler::new(&store);
        first_session.schedule(time("7:05:00 AM"), Persist::Save).unwrap();
        first_session.schedule(time("8:10:00 AM"), Persist::Save).unwrap();
        first_session.schedule(time("9:15:00 PM"), Persist::Save).unwrap();
    }
    let persisted_before = store.raw_value();

    let mut second_session = Scheduler::new(&store);
    let restored = second_session.restore();

    assert_eq!(restored, 3);
    assert_eq!(second_session.len(), 3);
    let mut times: Vec<&str> = second_session
        .alarms()
        .iter()
        .map(|reg| reg.time.as_str())
        .collect();
    times.sort_unstable();
    assert_eq!(times, ["7:05:00 AM", "8:10:00 AM", "9:15:00 PM"]);

    // Restoration must not write: the raw slot is byte-identical.
    assert_eq!(store.raw_value(), persisted_before);
}

#[test]
fn delete_removes_one_entry_and_stops_ticks() {
    let store = MemoryStore::new();
    let mut sched = Scheduler::new(&store);
    let keep = sched.schedule(time("6:00:00 AM"), Persist::Save).unwrap();
    let doomed = sched.schedule(time("7:05:00 AM"), Persist::Save).unwrap();

    assert!(sched.delete(doomed).unwrap());

    assert_eq!(sched.len(), 1);
    assert!(sched.get(keep).is_some());
    assert_eq!(store.load().len(), 1);
    // The deleted alarm's second arriving produces nothing.
    assert!(sched.tick(&time("7:05:00 AM")).is_empty());
}

#[test]
fn delete_of_unknown_registration_is_a_noop() {
    let store = MemoryStore::new();
    let mut sched = Scheduler::new(&store);
    let id = sched.schedule(time("6:00:00 AM"), Persist::Save).unwrap();
    sched.delete(id).unwrap();

    // Second delete of the same id, and a delete by a time that was never
    // scheduled: both leave storage and the live set unchanged.
    assert!(!sched.delete(id).unwrap());
    assert!(sched.delete_by_time(&time("4:44:44 AM")).unwrap().is_none());
    assert!(sched.is_empty());
    assert!(store.load().is_empty());
}

#[test]
fn duplicate_times_delete_independently() {
    let store = MemoryStore::new();
    let mut sched = Scheduler::new(&store);
    let first = sched.schedule(time("7:05:00 AM"), Persist::Save).unwrap();
    let second = sched.schedule(time("7:05:00 AM"), Persist::Save).unwrap();
    assert_ne!(first, second);

    assert!(sched.delete(second).unwrap());

    assert_eq!(sched.len(), 1);
    assert_eq!(sched.get(first).unwrap().time.as_str(), "7:05:00 AM");
    assert_eq!(store.load().len(), 1);
}

#[test]
fn fire_does_not_mutate_storage() {
    let store = MemoryStore::new();
    let mut sched = Scheduler::new(&store);
    let id = sched
        .schedule(
            AlarmTime::from_parts(7, 5, 0, chime_core::Meridiem::Am).unwrap(),
            Persist::Save,
        )
        .unwrap();

    assert_eq!(store.raw_value().as_deref(), Some(r#"["7:05:00 AM"]"#));
    assert_eq!(sched.get(id).unwrap().state, AlarmState::Pending);

    let fired = sched.tick(&time("7:05:00 AM"));
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].time.as_str(), "7:05:00 AM");
    assert_eq!(sched.get(id).unwrap().state, AlarmState::Firing);
    assert_eq!(store.raw_value().as_deref(), Some(r#"["7:05:00 AM"]"#));
}

#[test]
fn firing_alarm_can_still_be_deleted() {
    let store = MemoryStore::new();
    let mut sched = Scheduler::new(&store);
    let id = sched.schedule(time("7:05:00 AM"), Persist::Save).unwrap();
    sched.tick(&time("7:05:00 AM"));

    assert!(sched.delete(id).unwrap());
    assert!(sched.is_empty());
    assert!(store.load().is_empty());
}

#[test]
fn restored_alarm_fires_like_a_fresh_one() {
    let store = MemoryStore::new();
    {
        let mut first_session = Scheduler::new(&store);
        first_session.schedule(time("7:05:00 AM"), Persist::Save).unwrap();
    }

    let mut second_session = Scheduler::new(&store);
    second_session.restore();

    let fired = second_session.tick(&time("7:05:00 AM"));
    assert_eq!(fired.len(), 1);
}
