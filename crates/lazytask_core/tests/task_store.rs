use chrono::{TimeZone, Utc};
use lazytask_core::{
    FixedClock, MemorySlot, Notification, NotificationQueue, SequentialIdGenerator,
    SlotPersistence, Task, TaskFilter, TaskPersistence, TaskStore,
};
use std::collections::HashSet;

type MemoryStore = TaskStore<SlotPersistence<MemorySlot>>;

fn store_with_queue() -> (MemoryStore, NotificationQueue, MemorySlot) {
    let queue = NotificationQueue::new();
    let slot = MemorySlot::new();
    let store = TaskStore::open(SlotPersistence::new(slot.clone()))
        .with_id_generator(SequentialIdGenerator::new("t"))
        .with_clock(FixedClock(
            Utc.with_ymd_and_hms(2026, 2, 13, 10, 0, 0).unwrap(),
        ))
        .with_notifier(queue.clone());
    (store, queue, slot)
}

fn stored(slot: &MemorySlot) -> Option<Vec<Task>> {
    SlotPersistence::new(slot.clone()).load()
}

fn titles(store: &MemoryStore) -> Vec<&str> {
    store.tasks().iter().map(|task| task.title.as_str()).collect()
}

#[test]
fn blank_titles_are_silent_noops() {
    let (mut store, queue, slot) = store_with_queue();

    store.add_task("", "x");
    store.add_task("   ", "x");

    assert!(store.tasks().is_empty());
    assert!(queue.is_empty());
    assert_eq!(stored(&slot), None);
}

#[test]
fn add_places_new_task_first_with_distinct_id() {
    let (mut store, queue, _slot) = store_with_queue();
    store.add_task("Older", "");

    let id = store.add_task("Buy milk", "").unwrap();

    let first = &store.tasks()[0];
    assert_eq!(first.id, id);
    assert_eq!(first.title, "Buy milk");
    assert!(!first.completed);
    let ids = store
        .tasks()
        .iter()
        .map(|task| task.id.as_str())
        .collect::<HashSet<_>>();
    assert_eq!(ids.len(), store.tasks().len());
    assert_eq!(
        queue.drain(),
        vec![Notification::TaskAdded, Notification::TaskAdded]
    );
}

#[test]
fn toggle_twice_restores_completion() {
    let (mut store, queue, slot) = store_with_queue();
    let id = store.add_task("A", "").unwrap();
    queue.drain();

    store.toggle_complete(&id);
    assert!(store.get(&id).unwrap().completed);
    store.toggle_complete(&id);
    assert!(!store.get(&id).unwrap().completed);

    assert!(queue.is_empty());
    let persisted = stored(&slot).unwrap();
    assert!(!persisted[0].completed);
}

#[test]
fn second_delete_is_noop() {
    let (mut store, queue, _slot) = store_with_queue();
    let id = store.add_task("A", "").unwrap();
    store.add_task("B", "").unwrap();
    queue.drain();

    store.delete_task(&id);
    store.delete_task(&id);

    assert_eq!(titles(&store), vec!["B"]);
    assert_eq!(queue.drain(), vec![Notification::TaskDeleted]);
}

#[test]
fn edit_updates_text_and_persists() {
    let (mut store, queue, slot) = store_with_queue();
    let id = store.add_task("Draft", "").unwrap();
    queue.drain();

    store.edit_task(&id, "Final", "with notes");
    store.edit_task(&id, "  ", "ignored");
    store.edit_task("missing", "Other", "");

    let task = store.get(&id).unwrap();
    assert_eq!(task.title, "Final");
    assert_eq!(task.description, "with notes");
    assert_eq!(queue.drain(), vec![Notification::TaskUpdated]);
    assert_eq!(stored(&slot).unwrap()[0].title, "Final");
}

#[test]
fn filtered_views_are_ordered_subsets() {
    let (mut store, _queue, _slot) = store_with_queue();
    let a = store.add_task("A", "").unwrap();
    store.add_task("B", "").unwrap();
    store.add_task("C", "").unwrap();
    store.toggle_complete(&a);

    for filter in TaskFilter::ALL {
        store.set_filter(filter);
        let visible = store
            .filtered_tasks()
            .into_iter()
            .map(|task| task.id.clone())
            .collect::<Vec<_>>();
        let expected = store
            .tasks()
            .iter()
            .filter(|task| filter.matches(task))
            .map(|task| task.id.clone())
            .collect::<Vec<_>>();
        assert_eq!(visible, expected);
        assert_eq!(visible.len(), store.counts().get(filter));
    }

    store.set_filter(TaskFilter::All);
    assert_eq!(store.filtered_tasks().len(), store.tasks().len());
}

#[test]
fn add_toggle_filter_scenario() {
    let (mut store, _queue, _slot) = store_with_queue();

    let a = store.add_task("A", "").unwrap();
    store.add_task("B", "").unwrap();
    assert_eq!(titles(&store), vec!["B", "A"]);

    store.toggle_complete(&a);
    store.set_filter(TaskFilter::Active);

    let visible = store
        .filtered_tasks()
        .into_iter()
        .map(|task| task.title.as_str())
        .collect::<Vec<_>>();
    assert_eq!(visible, vec!["B"]);
}

#[test]
fn filter_is_not_persisted_across_sessions() {
    let slot = MemorySlot::new();
    let mut first = TaskStore::open(SlotPersistence::new(slot.clone()));
    first.add_task("A", "");
    first.set_filter(TaskFilter::Completed);

    let second = TaskStore::open(SlotPersistence::new(slot));

    assert_eq!(second.filter(), TaskFilter::All);
    assert_eq!(second.tasks(), first.tasks());
}

#[test]
fn corrupted_snapshot_starts_empty() {
    let slot = MemorySlot::with_value("tasks", "this is not json");

    let store = TaskStore::open(SlotPersistence::new(slot));

    assert!(store.tasks().is_empty());
}

#[test]
fn snapshot_with_duplicate_ids_or_blank_titles_is_discarded() {
    let duplicate = r#"[
        {"id":"x","title":"A","description":"","completed":false,"createdAt":"2026-02-13T10:00:00.000Z"},
        {"id":"x","title":"B","description":"","completed":false,"createdAt":"2026-02-13T10:00:00.000Z"}
    ]"#;
    let blank = r#"[
        {"id":"y","title":"  ","description":"","completed":false,"createdAt":"2026-02-13T10:00:00.000Z"}
    ]"#;

    for raw in [duplicate, blank] {
        let store = TaskStore::open(SlotPersistence::new(MemorySlot::with_value("tasks", raw)));
        assert!(store.tasks().is_empty());
    }
}

#[test]
fn stored_snapshot_tracks_every_task_mutation() {
    let (mut store, _queue, slot) = store_with_queue();

    let a = store.add_task("A", "").unwrap();
    let b = store.add_task("B", "notes").unwrap();
    store.toggle_complete(&a);
    store.edit_task(&b, "B2", "");
    assert_eq!(stored(&slot).as_deref(), Some(store.tasks()));

    store.delete_task(&a);
    store.set_filter(TaskFilter::Completed);
    assert_eq!(stored(&slot).as_deref(), Some(store.tasks()));

    let reopened = TaskStore::open(SlotPersistence::new(slot));
    assert_eq!(reopened.tasks(), store.tasks());
}
