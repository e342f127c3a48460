//! Filter selector and derived counts for task views.
//!
//! A filter controls which tasks are visible, never which tasks exist.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// View selector over the task list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    /// Every task.
    #[default]
    All,
    /// Tasks with `completed == false`.
    Active,
    /// Tasks with `completed == true`.
    Completed,
}

impl TaskFilter {
    /// All selectors in display order.
    pub const ALL: [TaskFilter; 3] = [Self::All, Self::Active, Self::Completed];

    /// Stable string id used by UI bindings.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Returns whether `task` is visible under this selector.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }

    /// Headline and hint shown when the filtered view has no items.
    pub fn empty_state(self) -> EmptyState {
        match self {
            Self::All => EmptyState {
                headline: "No tasks yet",
                hint: "Add your first task to get started",
            },
            Self::Active => EmptyState {
                headline: "No active tasks",
                hint: "All tasks are completed. Great job!",
            },
            Self::Completed => EmptyState {
                headline: "No completed tasks",
                hint: "Complete some tasks to see them here",
            },
        }
    }
}

impl Display for TaskFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskFilter {
    type Err = ParseTaskFilterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskFilterError(value.to_string())),
        }
    }
}

/// Unknown filter string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTaskFilterError(pub String);

impl Display for ParseTaskFilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl Error for ParseTaskFilterError {}

/// Copy shown in place of an empty filtered list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyState {
    pub headline: &'static str,
    pub hint: &'static str,
}

/// Per-filter task counts for the filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaskCounts {
    pub all: usize,
    pub active: usize,
    pub completed: usize,
}

impl TaskCounts {
    /// Counts `tasks` under every selector in one pass.
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let completed = tasks.iter().filter(|task| task.completed).count();
        Self {
            all: tasks.len(),
            active: tasks.len() - completed,
            completed,
        }
    }

    /// Count for a single selector.
    pub fn get(&self, filter: TaskFilter) -> usize {
        match filter {
            TaskFilter::All => self.all,
            TaskFilter::Active => self.active,
            TaskFilter::Completed => self.completed,
        }
    }
}
