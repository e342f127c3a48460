//! Pure state transition for the task store.
//!
//! # Responsibility
//! - Define the command vocabulary accepted by the store.
//! - Compute the next state for one command without side effects.
//!
//! # Invariants
//! - `reduce` never reads clocks, generates ids, logs, or touches storage.
//! - Blank titles and unknown ids leave the task list untouched.
//! - New tasks are prepended; no command reorders existing tasks.

use crate::model::filter::{TaskCounts, TaskFilter};
use crate::model::task::{is_blank_title, Task, TaskId};
use crate::notify::Notification;

/// Tagged store command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    /// Replace the task list with a hydrated snapshot.
    Init(Vec<Task>),
    /// Prepend a fully built task.
    Add(Task),
    Edit {
        id: TaskId,
        title: String,
        description: String,
    },
    Delete {
        id: TaskId,
    },
    ToggleComplete {
        id: TaskId,
    },
    SetFilter(TaskFilter),
}

/// Authoritative in-memory store state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    tasks: Vec<Task>,
    filter: TaskFilter,
}

impl StoreState {
    pub fn new(tasks: Vec<Task>, filter: TaskFilter) -> Self {
        Self { tasks, filter }
    }

    /// Full task list, most recent first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    /// Tasks visible under the current filter, in list order.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.tasks_matching(self.filter)
    }

    /// Tasks visible under `filter`, in list order.
    pub fn tasks_matching(&self, filter: TaskFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| filter.matches(task))
            .collect()
    }

    pub fn counts(&self) -> TaskCounts {
        TaskCounts::from_tasks(&self.tasks)
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }
}

/// What a command did to the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Precondition failed; state is identical to the input.
    Unchanged,
    /// Task list replaced from storage; nothing new to persist.
    Hydrated,
    /// Only the view filter changed.
    FilterChanged,
    /// The task list changed and must be persisted.
    TasksChanged { notification: Option<Notification> },
}

/// Result of one `reduce` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: StoreState,
    pub outcome: Outcome,
}

impl Transition {
    fn unchanged(state: StoreState) -> Self {
        Self {
            state,
            outcome: Outcome::Unchanged,
        }
    }

    fn tasks_changed(state: StoreState, notification: Option<Notification>) -> Self {
        Self {
            state,
            outcome: Outcome::TasksChanged { notification },
        }
    }

    /// Whether the caller must write a new snapshot.
    pub fn should_persist(&self) -> bool {
        matches!(self.outcome, Outcome::TasksChanged { .. })
    }

    /// Notification the caller should deliver, if any.
    pub fn notification(&self) -> Option<Notification> {
        match self.outcome {
            Outcome::TasksChanged { notification } => notification,
            _ => None,
        }
    }
}

/// Applies `command` to `state` and returns the next state.
pub fn reduce(mut state: StoreState, command: TaskCommand) -> Transition {
    match command {
        TaskCommand::Init(tasks) => {
            state.tasks = tasks;
            Transition {
                state,
                outcome: Outcome::Hydrated,
            }
        }
        TaskCommand::Add(task) => {
            if task.validate().is_err() || state.position(&task.id).is_some() {
                return Transition::unchanged(state);
            }
            state.tasks.insert(0, task);
            Transition::tasks_changed(state, Some(Notification::TaskAdded))
        }
        TaskCommand::Edit {
            id,
            title,
            description,
        } => {
            if is_blank_title(&title) {
                return Transition::unchanged(state);
            }
            let Some(index) = state.position(&id) else {
                return Transition::unchanged(state);
            };
            let task = &mut state.tasks[index];
            task.title = title;
            task.description = description;
            Transition::tasks_changed(state, Some(Notification::TaskUpdated))
        }
        TaskCommand::Delete { id } => match state.position(&id) {
            Some(index) => {
                state.tasks.remove(index);
                Transition::tasks_changed(state, Some(Notification::TaskDeleted))
            }
            None => Transition::unchanged(state),
        },
        TaskCommand::ToggleComplete { id } => match state.position(&id) {
            Some(index) => {
                let task = &mut state.tasks[index];
                task.completed = !task.completed;
                Transition::tasks_changed(state, None)
            }
            None => Transition::unchanged(state),
        },
        TaskCommand::SetFilter(filter) => {
            state.filter = filter;
            Transition {
                state,
                outcome: Outcome::FilterChanged,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, Outcome, StoreState, TaskCommand};
    use crate::model::filter::TaskFilter;
    use crate::model::task::Task;
    use crate::notify::Notification;
    use chrono::{TimeZone, Utc};

    fn task(id: &str, title: &str) -> Task {
        let created_at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();
        Task::new(id, title, "", created_at)
    }

    #[test]
    fn add_prepends_and_requests_notification() {
        let state = StoreState::new(vec![task("a", "A")], TaskFilter::All);

        let next = reduce(state, TaskCommand::Add(task("b", "B")));

        assert!(next.should_persist());
        assert_eq!(next.notification(), Some(Notification::TaskAdded));
        let ids = next
            .state
            .tasks()
            .iter()
            .map(|task| task.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn add_rejects_blank_title_and_duplicate_id() {
        let state = StoreState::new(vec![task("a", "A")], TaskFilter::All);

        let blank = reduce(state.clone(), TaskCommand::Add(task("b", "  ")));
        assert_eq!(blank.outcome, Outcome::Unchanged);
        assert_eq!(blank.state, state);

        let duplicate = reduce(state.clone(), TaskCommand::Add(task("a", "again")));
        assert_eq!(duplicate.outcome, Outcome::Unchanged);
        assert_eq!(duplicate.state, state);
    }

    #[test]
    fn edit_preserves_identity_fields() {
        let mut original = task("a", "A");
        original.completed = true;
        let state = StoreState::new(vec![original.clone()], TaskFilter::All);

        let next = reduce(
            state,
            TaskCommand::Edit {
                id: "a".to_string(),
                title: "A2".to_string(),
                description: "details".to_string(),
            },
        );

        assert_eq!(next.notification(), Some(Notification::TaskUpdated));
        let edited = next.state.get("a").unwrap();
        assert_eq!(edited.title, "A2");
        assert_eq!(edited.description, "details");
        assert!(edited.completed);
        assert_eq!(edited.created_at, original.created_at);
    }

    #[test]
    fn edit_with_blank_title_or_unknown_id_is_noop() {
        let state = StoreState::new(vec![task("a", "A")], TaskFilter::All);

        let blank = reduce(
            state.clone(),
            TaskCommand::Edit {
                id: "a".to_string(),
                title: "   ".to_string(),
                description: String::new(),
            },
        );
        assert_eq!(blank.outcome, Outcome::Unchanged);

        let missing = reduce(
            state.clone(),
            TaskCommand::Edit {
                id: "zzz".to_string(),
                title: "B".to_string(),
                description: String::new(),
            },
        );
        assert_eq!(missing.outcome, Outcome::Unchanged);
        assert_eq!(missing.state, state);
    }

    #[test]
    fn toggle_changes_tasks_without_notification() {
        let state = StoreState::new(vec![task("a", "A")], TaskFilter::All);

        let next = reduce(
            state,
            TaskCommand::ToggleComplete {
                id: "a".to_string(),
            },
        );

        assert!(next.should_persist());
        assert_eq!(next.notification(), None);
        assert!(next.state.get("a").unwrap().completed);
    }

    #[test]
    fn delete_unknown_id_is_noop() {
        let state = StoreState::new(vec![task("a", "A")], TaskFilter::All);

        let next = reduce(
            state.clone(),
            TaskCommand::Delete {
                id: "missing".to_string(),
            },
        );

        assert_eq!(next.outcome, Outcome::Unchanged);
        assert_eq!(next.state, state);
    }

    #[test]
    fn set_filter_and_init_do_not_request_persistence() {
        let filtered = reduce(
            StoreState::default(),
            TaskCommand::SetFilter(TaskFilter::Completed),
        );
        assert_eq!(filtered.outcome, Outcome::FilterChanged);
        assert!(!filtered.should_persist());
        assert_eq!(filtered.state.filter(), TaskFilter::Completed);

        let hydrated = reduce(StoreState::default(), TaskCommand::Init(vec![task("a", "A")]));
        assert_eq!(hydrated.outcome, Outcome::Hydrated);
        assert!(!hydrated.should_persist());
        assert_eq!(hydrated.state.tasks().len(), 1);
    }

    #[test]
    fn filtered_view_preserves_relative_order() {
        let mut done = task("b", "B");
        done.completed = true;
        let state = StoreState::new(
            vec![task("c", "C"), done, task("a", "A")],
            TaskFilter::Active,
        );

        let ids = state
            .filtered_tasks()
            .into_iter()
            .map(|task| task.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(state.tasks_matching(TaskFilter::All).len(), 3);
    }
}
