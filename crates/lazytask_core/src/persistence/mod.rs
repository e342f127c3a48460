//! Snapshot persistence for the task list.
//!
//! # Responsibility
//! - Abstract the durable key-value slot the snapshot lives in.
//! - Convert between the JSON wire snapshot and typed `Task` records.
//! - Give the store a load/save contract that never fails loudly.
//!
//! # Invariants
//! - Each save replaces the whole snapshot; there are no partial writes.
//! - Unreadable or unparseable snapshots load as "no prior state".

pub mod adapter;
pub mod slot;
pub mod snapshot;

pub use adapter::{SlotPersistence, TaskPersistence, DEFAULT_STORAGE_KEY};
pub use slot::{KeyValueSlot, MemorySlot, SlotError, SlotResult, SqliteSlot};
pub use snapshot::{decode_snapshot, encode_snapshot, SnapshotError};
