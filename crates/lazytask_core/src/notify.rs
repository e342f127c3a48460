//! User-facing notifications emitted after store mutations.
//!
//! # Responsibility
//! - Describe what the UI should announce after a successful mutation.
//! - Provide delivery sinks: log-only and a drainable queue for UI layers.
//!
//! # Invariants
//! - Notifications are data; the transition function never delivers them.
//! - Toggling completion never produces a notification.

use log::info;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

/// Announcement produced by an applied mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    TaskAdded,
    TaskUpdated,
    TaskDeleted,
}

impl Notification {
    /// Stable event name used in logs and UI bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TaskAdded => "task_added",
            Self::TaskUpdated => "task_updated",
            Self::TaskDeleted => "task_deleted",
        }
    }

    /// Short toast headline.
    pub fn title(self) -> &'static str {
        match self {
            Self::TaskAdded => "Task added",
            Self::TaskUpdated => "Task updated",
            Self::TaskDeleted => "Task deleted",
        }
    }

    /// Toast body text.
    pub fn description(self) -> &'static str {
        match self {
            Self::TaskAdded => "Your new task has been added successfully",
            Self::TaskUpdated => "Your task has been updated successfully",
            Self::TaskDeleted => "Task has been deleted successfully",
        }
    }
}

/// Delivery sink for store notifications.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Default sink: records the event in core logs only.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notification: Notification) {
        info!(
            "event=notification module=store status=ok kind={}",
            notification.as_str()
        );
    }
}

/// Cloneable FIFO buffer of notifications for a UI layer to drain.
///
/// Clones share one buffer, so the store can own one handle while the
/// binding layer keeps another.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    inner: Arc<Mutex<VecDeque<Notification>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every pending notification in emission order.
    pub fn drain(&self) -> Vec<Notification> {
        let mut queue = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        queue.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, notification: Notification) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(notification);
    }
}
