//! Alarm store contract, JSON-file implementation and in-memory double.
//!
//! # Responsibility
//! - Persist the ordered alarm list as one JSON array under one well-known
//!   key (a single file on disk, a single string slot in memory).
//! - Degrade absent or corrupt data to the empty list instead of surfacing
//!   a read error.
//!
//! # Invariants
//! - `load` never fails; only write paths return `StoreError`.
//! - `remove` deletes the first value-equal occurrence and is a silent
//!   no-op when the value is absent.
//! - File writes are atomic (temp file then rename), so a crash mid-write
//!   leaves either the old list or the new list, never a torn one.

use crate::model::alarm::AlarmTime;
use log::{debug, warn};
use std::cell::RefCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "alarms.json";

pub type StoreResult<T> = Result<T, StoreError>;

/// Error for alarm-list write operations.
#[derive(Debug)]
pub enum StoreError {
    Io(io::Error),
    Serialize(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "alarm store io failure: {err}"),
            Self::Serialize(err) => write!(f, "alarm list encoding failure: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for StoreError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Durable store interface for the persisted alarm list.
pub trait AlarmStore {
    /// Returns the persisted alarm list, empty when no usable data exists.
    fn load(&self) -> Vec<AlarmTime>;
    /// Appends one entry and writes the whole list back.
    fn append(&self, time: &AlarmTime) -> StoreResult<()>;
    /// Removes the first value-equal entry; no-op when absent.
    fn remove(&self, time: &AlarmTime) -> StoreResult<()>;
}

impl<S: AlarmStore> AlarmStore for &S {
    fn load(&self) -> Vec<AlarmTime> {
        (**self).load()
    }

    fn append(&self, time: &AlarmTime) -> StoreResult<()> {
        (**self).append(time)
    }

    fn remove(&self, time: &AlarmTime) -> StoreResult<()> {
        (**self).remove(time)
    }
}

/// Decodes one raw store value into usable alarm times.
///
/// Two degradation layers, both fail-soft:
/// - the whole value failing JSON decode yields the empty list;
/// - an individual entry failing canonical re-validation is dropped, since
///   a non-canonical string can never match the clock and would otherwise
///   sit in the list as a dead alarm forever.
fn decode_list(raw: &str) -> Vec<AlarmTime> {
    let entries: Vec<String> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("event=store_load module=repo status=corrupt error={err}");
            return Vec::new();
        }
    };

    entries
        .iter()
        .filter_map(|entry| match AlarmTime::parse(entry) {
            Ok(time) => Some(time),
            Err(err) => {
                warn!("event=store_load module=repo status=dropped_entry error={err}");
                None
            }
        })
        .collect()
}

fn encode_list(times: &[AlarmTime]) -> StoreResult<String> {
    Ok(serde_json::to_string(times)?)
}

/// File-backed store: one JSON array in `alarms.json` under a data
/// directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `data_dir`. The directory is created on
    /// first write, not here.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(STORE_FILE_NAME),
        }
    }

    /// Returns the backing file path (diagnostics and tests).
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, times: &[AlarmTime]) -> StoreResult<()> {
        let encoded = encode_list(times)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        // Atomic replace: a crash between the two steps leaves the previous
        // list intact.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, encoded)?;
        fs::rename(&tmp, &self.path)?;

        debug!(
            "event=store_write module=repo status=ok entries={} path={}",
            times.len(),
            self.path.display()
        );
        Ok(())
    }
}

impl AlarmStore for JsonFileStore {
    fn load(&self) -> Vec<AlarmTime> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(
                    "event=store_load module=repo status=absent path={}",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=store_load module=repo status=unreadable path={} error={err}",
                    self.path.display()
                );
                return Vec::new();
            }
        };
        decode_list(&raw)
    }

    fn append(&self, time: &AlarmTime) -> StoreResult<()> {
        let mut times = self.load();
        times.push(time.clone());
        self.write(&times)
    }

    fn remove(&self, time: &AlarmTime) -> StoreResult<()> {
        let mut times = self.load();
        let Some(index) = times.iter().position(|entry| entry == time) else {
            return Ok(());
        };
        times.remove(index);
        self.write(&times)
    }
}

/// In-memory store double mirroring a single key-value string slot.
///
/// Holds exactly what a durable KV backend would: `None` for an absent key,
/// otherwise one raw string value. Used by scheduler tests and headless
/// runs; `with_raw_value` seeds corrupt data for fail-soft coverage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the slot with an arbitrary raw value, valid JSON or not.
    pub fn with_raw_value(raw: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(raw.into())),
        }
    }

    /// Returns the raw slot value as persisted.
    pub fn raw_value(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl AlarmStore for MemoryStore {
    fn load(&self) -> Vec<AlarmTime> {
        match self.value.borrow().as_deref() {
            Some(raw) => decode_list(raw),
            None => Vec::new(),
        }
    }

    fn append(&self, time: &AlarmTime) -> StoreResult<()> {
        let mut times = self.load();
        times.push(time.clone());
        *self.value.borrow_mut() = Some(encode_list(&times)?);
        Ok(())
    }

    fn remove(&self, time: &AlarmTime) -> StoreResult<()> {
        let mut times = self.load();
        let Some(index) = times.iter().position(|entry| entry == time) else {
            return Ok(());
        };
        times.remove(index);
        *self.value.borrow_mut() = Some(encode_list(&times)?);
        Ok(())
    }
}
