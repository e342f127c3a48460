//! Constructible task store with injected collaborators.
//!
//! # Responsibility
//! - Expose the task operations consumed by UI bindings.
//! - Generate ids and timestamps outside the transition function.
//! - Trigger a full snapshot save after each task-list change.
//!
//! # Invariants
//! - No operation returns an error or panics on bad input; precondition
//!   failures are silent no-ops.
//! - Filter changes are never persisted.
//! - The store is the only writer of its persistence adapter.

use crate::model::filter::{TaskCounts, TaskFilter};
use crate::model::task::{is_blank_title, validate_snapshot, Task, TaskId};
use crate::notify::{LogNotifier, Notifier};
use crate::persistence::{SlotPersistence, SqliteSlot, TaskPersistence};
use crate::store::ids::{Clock, IdGenerator, SystemClock, UuidIdGenerator};
use crate::store::transition::{reduce, Outcome, StoreState, TaskCommand};
use log::{debug, info, warn};

/// Store persisted through the SQLite key-value slot.
pub type SqliteTaskStore = TaskStore<SlotPersistence<SqliteSlot>>;

/// Single-session task store.
pub struct TaskStore<P: TaskPersistence> {
    state: StoreState,
    persistence: P,
    ids: Box<dyn IdGenerator + Send>,
    clock: Box<dyn Clock + Send>,
    notifier: Box<dyn Notifier + Send>,
}

impl<P: TaskPersistence> TaskStore<P> {
    /// Creates an empty store with default collaborators.
    ///
    /// Does not read persistence; call `initialize` or use `open`.
    pub fn new(persistence: P) -> Self {
        Self {
            state: StoreState::default(),
            persistence,
            ids: Box::new(UuidIdGenerator),
            clock: Box::new(SystemClock),
            notifier: Box::new(LogNotifier),
        }
    }

    /// Creates a store hydrated from `persistence.load()`.
    pub fn open(persistence: P) -> Self {
        let mut store = Self::new(persistence);
        store.hydrate();
        store
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notifier(mut self, notifier: impl Notifier + Send + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// Loads the stored snapshot and initializes from it.
    pub fn hydrate(&mut self) {
        let snapshot = self.persistence.load();
        self.initialize(snapshot);
    }

    /// Replaces the task list with a prior snapshot.
    ///
    /// `None` keeps the current (empty) list. A snapshot with duplicate ids
    /// or invalid records is discarded wholesale and the list becomes empty.
    pub fn initialize(&mut self, snapshot: Option<Vec<Task>>) {
        let Some(tasks) = snapshot else {
            info!("event=store_init module=store status=ok source=empty count=0");
            return;
        };

        match validate_snapshot(&tasks) {
            Ok(()) => {
                info!(
                    "event=store_init module=store status=ok source=snapshot count={}",
                    tasks.len()
                );
                self.dispatch(TaskCommand::Init(tasks));
            }
            Err(err) => {
                warn!(
                    "event=store_init module=store status=error source=snapshot count={} error_code=snapshot_invalid error={}",
                    tasks.len(),
                    err
                );
                self.dispatch(TaskCommand::Init(Vec::new()));
            }
        }
    }

    /// Creates a task at the head of the list.
    ///
    /// Returns the new id, or `None` when `title` is blank.
    pub fn add_task(&mut self, title: &str, description: &str) -> Option<TaskId> {
        if is_blank_title(title) {
            debug!("event=task_add module=store status=skipped reason=blank_title");
            return None;
        }

        let id = self.ids.next_id();
        let task = Task::new(id.clone(), title, description, self.clock.now());
        match self.dispatch(TaskCommand::Add(task)) {
            Outcome::TasksChanged { .. } => {
                debug!("event=task_add module=store status=ok task_id={id}");
                Some(id)
            }
            _ => {
                warn!("event=task_add module=store status=skipped reason=id_conflict task_id={id}");
                None
            }
        }
    }

    /// Replaces title and description of an existing task.
    pub fn edit_task(&mut self, id: &str, title: &str, description: &str) {
        let outcome = self.dispatch(TaskCommand::Edit {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        });
        log_outcome("task_edit", id, outcome);
    }

    pub fn delete_task(&mut self, id: &str) {
        let outcome = self.dispatch(TaskCommand::Delete { id: id.to_string() });
        log_outcome("task_delete", id, outcome);
    }

    pub fn toggle_complete(&mut self, id: &str) {
        let outcome = self.dispatch(TaskCommand::ToggleComplete { id: id.to_string() });
        log_outcome("task_toggle", id, outcome);
    }

    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.dispatch(TaskCommand::SetFilter(filter));
        debug!(
            "event=filter_set module=store status=ok filter={}",
            filter.as_str()
        );
    }

    /// Full task list, most recent first.
    pub fn tasks(&self) -> &[Task] {
        self.state.tasks()
    }

    pub fn filter(&self) -> TaskFilter {
        self.state.filter()
    }

    /// Tasks visible under the current filter, recomputed on every call.
    pub fn filtered_tasks(&self) -> Vec<&Task> {
        self.state.filtered_tasks()
    }

    pub fn counts(&self) -> TaskCounts {
        self.state.counts()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.state.get(id)
    }

    fn dispatch(&mut self, command: TaskCommand) -> Outcome {
        let transition = reduce(std::mem::take(&mut self.state), command);
        let persist = transition.should_persist();
        let notification = transition.notification();
        let outcome = transition.outcome;
        self.state = transition.state;

        if persist {
            self.persistence.save(self.state.tasks());
        }
        if let Some(notification) = notification {
            self.notifier.notify(notification);
        }
        outcome
    }
}

fn log_outcome(event: &str, id: &str, outcome: Outcome) {
    match outcome {
        Outcome::Unchanged => {
            debug!("event={event} module=store status=skipped task_id={id}")
        }
        _ => debug!("event={event} module=store status=ok task_id={id}"),
    }
}

#[cfg(test)]
mod tests {
    use super::TaskStore;
    use crate::model::task::Task;
    use crate::persistence::TaskPersistence;
    use crate::store::ids::{FixedClock, IdGenerator, SequentialIdGenerator};
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    #[derive(Default)]
    struct CountingPersistence {
        saves: RefCell<Vec<Vec<Task>>>,
    }

    impl TaskPersistence for CountingPersistence {
        fn load(&self) -> Option<Vec<Task>> {
            None
        }

        fn save(&self, tasks: &[Task]) {
            self.saves.borrow_mut().push(tasks.to_vec());
        }
    }

    struct ConstantIds;

    impl IdGenerator for ConstantIds {
        fn next_id(&mut self) -> String {
            "same".to_string()
        }
    }

    fn store() -> TaskStore<CountingPersistence> {
        TaskStore::new(CountingPersistence::default())
            .with_id_generator(SequentialIdGenerator::new("t"))
            .with_clock(FixedClock(
                Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap(),
            ))
    }

    #[test]
    fn add_keeps_title_untrimmed_and_saves_once() {
        let mut store = store();

        let id = store.add_task("  Buy milk ", "").unwrap();

        assert_eq!(id, "t-1");
        assert_eq!(store.tasks()[0].title, "  Buy milk ");
        assert_eq!(store.persistence.saves.borrow().len(), 1);
    }

    #[test]
    fn blank_add_does_not_consume_an_id() {
        let mut store = store();

        assert_eq!(store.add_task("   ", "x"), None);
        assert_eq!(store.add_task("A", ""), Some("t-1".to_string()));
    }

    #[test]
    fn id_collision_from_generator_is_rejected() {
        let mut store =
            TaskStore::new(CountingPersistence::default()).with_id_generator(ConstantIds);

        assert!(store.add_task("first", "").is_some());
        assert_eq!(store.add_task("second", ""), None);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.persistence.saves.borrow().len(), 1);
    }

    #[test]
    fn initialize_does_not_write_back() {
        let mut store = store();
        let created_at = Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap();

        store.initialize(Some(vec![Task::new("a", "A", "", created_at)]));

        assert_eq!(store.tasks().len(), 1);
        assert!(store.persistence.saves.borrow().is_empty());
    }
}
