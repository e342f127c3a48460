//! Core task-tracking logic for LazyTask.
//! This crate is the single source of truth for task invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod persistence;
pub mod store;

pub use config::{ConfigError, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::filter::{EmptyState, ParseTaskFilterError, TaskCounts, TaskFilter};
pub use model::task::{format_timestamp, is_blank_title, Task, TaskId, TaskValidationError};
pub use notify::{LogNotifier, Notification, NotificationQueue, Notifier};
pub use persistence::{
    KeyValueSlot, MemorySlot, SlotError, SlotPersistence, SqliteSlot, TaskPersistence,
};
pub use store::ids::{
    Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidIdGenerator,
};
pub use store::task_store::{SqliteTaskStore, TaskStore};
pub use store::transition::{reduce, Outcome, StoreState, TaskCommand, Transition};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
