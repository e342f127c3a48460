//! Persistence adapter used by the task store.
//!
//! # Responsibility
//! - Load the prior snapshot, if any, at startup.
//! - Replace the stored snapshot after every task-list mutation.
//!
//! # Invariants
//! - `load` and `save` never return errors; failures are logged.
//! - Log lines carry counts and sizes only, never task text.

use crate::model::task::Task;
use crate::persistence::slot::KeyValueSlot;
use crate::persistence::snapshot::{decode_snapshot, encode_snapshot};
use log::{debug, error, info, warn};
use std::time::Instant;

/// Slot key holding the task snapshot.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";

/// Load/save contract the store depends on.
pub trait TaskPersistence {
    /// Returns the stored task list, or `None` when absent or unusable.
    fn load(&self) -> Option<Vec<Task>>;
    /// Overwrites the stored snapshot with `tasks`. Fire-and-forget.
    fn save(&self, tasks: &[Task]);
}

/// `TaskPersistence` over a single key of a `KeyValueSlot`.
pub struct SlotPersistence<K: KeyValueSlot> {
    slot: K,
    key: String,
}

impl<K: KeyValueSlot> SlotPersistence<K> {
    /// Uses `DEFAULT_STORAGE_KEY`.
    pub fn new(slot: K) -> Self {
        Self::with_key(slot, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(slot: K, key: impl Into<String>) -> Self {
        Self {
            slot,
            key: key.into(),
        }
    }
}

impl<K: KeyValueSlot> TaskPersistence for SlotPersistence<K> {
    fn load(&self) -> Option<Vec<Task>> {
        let raw = match self.slot.read(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=snapshot_load module=persistence status=empty key={}",
                    self.key
                );
                return None;
            }
            Err(err) => {
                error!(
                    "event=snapshot_load module=persistence status=error key={} error_code=slot_read_failed error={}",
                    self.key, err
                );
                return None;
            }
        };

        match decode_snapshot(&raw) {
            Ok(tasks) => {
                info!(
                    "event=snapshot_load module=persistence status=ok key={} count={}",
                    self.key,
                    tasks.len()
                );
                Some(tasks)
            }
            Err(err) => {
                warn!(
                    "event=snapshot_load module=persistence status=error key={} bytes={} error_code=snapshot_corrupt error={}",
                    self.key,
                    raw.len(),
                    err
                );
                None
            }
        }
    }

    fn save(&self, tasks: &[Task]) {
        let started_at = Instant::now();
        let encoded = match encode_snapshot(tasks) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=snapshot_save module=persistence status=error key={} error_code=snapshot_encode_failed error={}",
                    self.key, err
                );
                return;
            }
        };

        match self.slot.write(&self.key, &encoded) {
            Ok(()) => debug!(
                "event=snapshot_save module=persistence status=ok key={} count={} bytes={} duration_ms={}",
                self.key,
                tasks.len(),
                encoded.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=snapshot_save module=persistence status=error key={} duration_ms={} error_code=slot_write_failed error={}",
                self.key,
                started_at.elapsed().as_millis(),
                err
            ),
        }
    }
}
