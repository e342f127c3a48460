//! FFI task API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the task store's public surface to Dart via FRB.
//! - Translate core types into flat, UI-ready DTOs.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The store is reached only through an explicit `TaskSession` handle.
//! - Edit-mode flags and draft form text stay on the Dart side.

use lazytask_core::{
    core_version as core_version_inner, format_timestamp, init_logging as init_logging_inner,
    ping as ping_inner, Notification, NotificationQueue, SlotPersistence, SqliteSlot,
    SqliteTaskStore, StoreConfig, Task, TaskCounts, TaskFilter, TaskStore,
};
use log::warn;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Task row rendered by the list view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    /// ISO-8601 UTC; display formatting is left to the UI.
    pub created_at: String,
    pub created_at_epoch_ms: i64,
}

impl From<&Task> for TaskItem {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            completed: task.completed,
            created_at: format_timestamp(&task.created_at),
            created_at_epoch_ms: task.created_at.timestamp_millis(),
        }
    }
}

/// Counts shown on the filter bar buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskCountsView {
    pub all: u32,
    pub active: u32,
    pub completed: u32,
}

impl From<TaskCounts> for TaskCountsView {
    fn from(counts: TaskCounts) -> Self {
        let clamp = |value: usize| u32::try_from(value).unwrap_or(u32::MAX);
        Self {
            all: clamp(counts.all),
            active: clamp(counts.active),
            completed: clamp(counts.completed),
        }
    }
}

/// Everything the list screen needs for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    /// Tasks visible under `filter`, most recent first.
    pub items: Vec<TaskItem>,
    /// Active filter (`all|active|completed`).
    pub filter: String,
    pub counts: TaskCountsView,
    /// Shown when `items` is empty.
    pub empty_headline: String,
    pub empty_hint: String,
}

/// Toast payload drained after mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationItem {
    /// `task_added|task_updated|task_deleted`.
    pub kind: String,
    pub title: String,
    pub description: String,
}

impl From<Notification> for NotificationItem {
    fn from(notification: Notification) -> Self {
        Self {
            kind: notification.as_str().to_string(),
            title: notification.title().to_string(),
            description: notification.description().to_string(),
        }
    }
}

/// Opened task store for one UI session.
///
/// Dart keeps this handle and passes it to every call; there is no
/// process-wide store.
#[flutter_rust_bridge::frb(opaque)]
pub struct TaskSession {
    store: Mutex<SqliteTaskStore>,
    notifications: NotificationQueue,
}

impl TaskSession {
    /// Opens a session over the SQLite file at `db_path`.
    ///
    /// Blank `db_path` falls back to `LAZYTASK_DB_PATH` or the temp-dir
    /// default; blank `storage_key` falls back to `tasks`.
    ///
    /// # FFI contract
    /// - Never panics; returns an error message when the DB cannot open.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open(db_path: String, storage_key: Option<String>) -> Result<TaskSession, String> {
        let env = StoreConfig::from_env();
        let config = StoreConfig::new(
            non_blank_or(&db_path, &env.db_path().to_string_lossy()),
            non_blank_or(storage_key.as_deref().unwrap_or(""), env.storage_key()),
        )
        .map_err(|err| format!("task_session_open failed: {err}"))?;

        let notifications = NotificationQueue::new();
        let store = config
            .open_store()
            .map_err(|err| format!("task_session_open failed: {err}"))?
            .with_notifier(notifications.clone());
        Ok(Self::from_store(store, notifications))
    }

    /// Opens a session whose tasks vanish with the handle.
    #[flutter_rust_bridge::frb(sync)]
    pub fn open_in_memory() -> Result<TaskSession, String> {
        let slot = SqliteSlot::open_in_memory()
            .map_err(|err| format!("task_session_open failed: {err}"))?;
        let notifications = NotificationQueue::new();
        let store =
            TaskStore::open(SlotPersistence::new(slot)).with_notifier(notifications.clone());
        Ok(Self::from_store(store, notifications))
    }

    fn from_store(store: SqliteTaskStore, notifications: NotificationQueue) -> Self {
        Self {
            store: Mutex::new(store),
            notifications,
        }
    }

    /// Full task list, ignoring the filter.
    #[flutter_rust_bridge::frb(sync)]
    pub fn list(&self) -> Vec<TaskItem> {
        self.store().tasks().iter().map(TaskItem::from).collect()
    }

    /// Filtered list plus filter-bar and empty-state data.
    #[flutter_rust_bridge::frb(sync)]
    pub fn view(&self) -> TaskListView {
        let store = self.store();
        let filter = store.filter();
        let empty_state = filter.empty_state();
        TaskListView {
            items: store
                .filtered_tasks()
                .into_iter()
                .map(TaskItem::from)
                .collect(),
            filter: filter.as_str().to_string(),
            counts: store.counts().into(),
            empty_headline: empty_state.headline.to_string(),
            empty_hint: empty_state.hint.to_string(),
        }
    }

    /// Returns the new task id, or `None` for a blank title.
    #[flutter_rust_bridge::frb(sync)]
    pub fn add_task(&self, title: String, description: String) -> Option<String> {
        self.store().add_task(&title, &description)
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn edit_task(&self, id: String, title: String, description: String) {
        self.store().edit_task(&id, &title, &description);
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn delete_task(&self, id: String) {
        self.store().delete_task(&id);
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn toggle_complete(&self, id: String) {
        self.store().toggle_complete(&id);
    }

    /// Returns empty string on success and error message for unknown filters.
    #[flutter_rust_bridge::frb(sync)]
    pub fn set_filter(&self, filter: String) -> String {
        match filter.parse::<TaskFilter>() {
            Ok(filter) => {
                self.store().set_filter(filter);
                String::new()
            }
            Err(err) => {
                warn!("event=filter_set module=ffi status=error error_code=unknown_filter");
                err.to_string()
            }
        }
    }

    /// Removes and returns pending toasts in emission order.
    #[flutter_rust_bridge::frb(sync)]
    pub fn drain_notifications(&self) -> Vec<NotificationItem> {
        self.notifications
            .drain()
            .into_iter()
            .map(NotificationItem::from)
            .collect()
    }

    fn store(&self) -> MutexGuard<'_, SqliteTaskStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn non_blank_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
