use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::collections::BTreeSet;
use taskloop_core::{Recurrence, RecurrenceRule, Task, TaskPatch, TaskStore};
use uuid::Uuid;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn completed_daily_task(due: NaiveDate) -> Task {
    let mut task = Task::new("water plants", now());
    task.completed = true;
    task.due_date = Some(due);
    task.recurrence = Some(Recurrence::new(RecurrenceRule::Daily { interval: 1 }));
    task
}

#[test]
fn add_and_get_round_trip() {
    let mut store = TaskStore::new();
    let task = Task::new("buy groceries", now());
    let id = task.id;

    store.add_task(task);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(id).unwrap().title, "buy groceries");
}

#[test]
fn add_does_not_deduplicate_ids() {
    let mut store = TaskStore::new();
    let task = Task::new("duplicated", now());
    store.add_task(task.clone());
    store.add_task(task);
    assert_eq!(store.len(), 2);
}

#[test]
fn toggle_twice_restores_the_flag() {
    let mut store = TaskStore::new();
    let task = Task::new("laundry", now());
    let id = task.id;
    store.add_task(task);

    store.toggle_task(id);
    assert!(store.get(id).unwrap().completed);
    store.toggle_task(id);
    assert!(!store.get(id).unwrap().completed);
}

#[test]
fn toggle_unknown_id_is_a_noop() {
    let mut store = TaskStore::new();
    store.add_task(Task::new("untouched", now()));
    store.toggle_task(Uuid::new_v4());
    assert!(!store.tasks()[0].completed);
}

#[test]
fn update_merges_only_provided_fields() {
    let mut store = TaskStore::new();
    let mut task = Task::new("old title", now());
    task.due_date = Some(date(2026, 3, 5));
    let id = task.id;
    store.add_task(task);

    store.update_task(
        id,
        TaskPatch {
            title: Some("new title".to_string()),
            ..TaskPatch::default()
        },
    );

    let updated = store.get(id).unwrap();
    assert_eq!(updated.title, "new title");
    assert_eq!(updated.due_date, Some(date(2026, 3, 5)));
}

#[test]
fn update_can_clear_nullable_fields() {
    let mut store = TaskStore::new();
    let mut task = Task::new("recurring", now());
    task.due_date = Some(date(2026, 3, 5));
    task.recurrence = Some(Recurrence::new(RecurrenceRule::Daily { interval: 1 }));
    let id = task.id;
    store.add_task(task);

    store.update_task(
        id,
        TaskPatch {
            due_date: Some(None),
            recurrence: Some(None),
            ..TaskPatch::default()
        },
    );

    let updated = store.get(id).unwrap();
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.recurrence, None);
}

#[test]
fn update_unknown_id_is_a_noop() {
    let mut store = TaskStore::new();
    store.add_task(Task::new("kept", now()));
    store.update_task(
        Uuid::new_v4(),
        TaskPatch {
            title: Some("ignored".to_string()),
            ..TaskPatch::default()
        },
    );
    assert_eq!(store.tasks()[0].title, "kept");
}

#[test]
fn delete_twice_is_idempotent() {
    let mut store = TaskStore::new();
    let task = Task::new("remove me", now());
    let id = task.id;
    store.add_task(task);
    store.add_task(Task::new("keep me", now()));

    store.delete_task(id);
    assert_eq!(store.len(), 1);
    store.delete_task(id);
    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].title, "keep me");
}

#[test]
fn generate_spawns_one_instance_for_a_completed_daily_task() {
    let mut store = TaskStore::new();
    let source = completed_daily_task(date(2026, 3, 2));
    let source_id = source.id;
    store.add_task(source);

    let spawned = store.generate_recurring_instances(now());

    assert_eq!(spawned, 1);
    assert_eq!(store.len(), 2);
    let instance = &store.tasks()[1];
    assert_ne!(instance.id, source_id);
    assert_eq!(instance.title, "water plants");
    assert!(!instance.completed);
    assert_eq!(instance.due_date, Some(date(2026, 3, 3)));
    assert_eq!(
        instance.recurrence,
        store.get(source_id).unwrap().recurrence
    );
    // The source is stamped so the scan stays idempotent.
    assert_eq!(
        store.get(source_id).unwrap().last_generated,
        Some(date(2026, 3, 3))
    );
}

#[test]
fn generate_is_idempotent_without_new_completions() {
    let mut store = TaskStore::new();
    store.add_task(completed_daily_task(date(2026, 3, 2)));

    assert_eq!(store.generate_recurring_instances(now()), 1);
    assert_eq!(store.generate_recurring_instances(now()), 0);
    assert_eq!(store.generate_recurring_instances(now()), 0);
    assert_eq!(store.len(), 2);
}

#[test]
fn completing_the_spawned_instance_continues_the_chain() {
    let mut store = TaskStore::new();
    store.add_task(completed_daily_task(date(2026, 3, 2)));
    store.generate_recurring_instances(now());

    let instance_id = store.tasks()[1].id;
    store.toggle_task(instance_id);
    let spawned = store.generate_recurring_instances(now());

    assert_eq!(spawned, 1);
    assert_eq!(store.len(), 3);
    assert_eq!(store.tasks()[2].due_date, Some(date(2026, 3, 4)));
}

#[test]
fn generate_skips_occurrences_on_or_after_the_end_date() {
    let mut store = TaskStore::new();
    let mut task = completed_daily_task(date(2026, 3, 2));
    // Next occurrence would be 2026-03-03; the cutoff is exclusive.
    task.recurrence = Some(Recurrence::ending(
        RecurrenceRule::Daily { interval: 1 },
        date(2026, 3, 3),
    ));
    store.add_task(task);

    assert_eq!(store.generate_recurring_instances(now()), 0);
    assert_eq!(store.len(), 1);
}

#[test]
fn generate_allows_occurrences_strictly_before_the_end_date() {
    let mut store = TaskStore::new();
    let mut task = completed_daily_task(date(2026, 3, 2));
    task.recurrence = Some(Recurrence::ending(
        RecurrenceRule::Daily { interval: 1 },
        date(2026, 3, 4),
    ));
    store.add_task(task);

    assert_eq!(store.generate_recurring_instances(now()), 1);
}

#[test]
fn generate_skips_incomplete_or_dateless_tasks() {
    let mut store = TaskStore::new();

    // Not completed.
    let mut pending = completed_daily_task(date(2026, 3, 2));
    pending.completed = false;
    store.add_task(pending);

    // Recurring but no due date: valid, never spawns.
    let mut dateless = completed_daily_task(date(2026, 3, 2));
    dateless.due_date = None;
    store.add_task(dateless);

    // Completed but not recurring.
    let mut plain = Task::new("one-off", now());
    plain.completed = true;
    plain.due_date = Some(date(2026, 3, 2));
    store.add_task(plain);

    assert_eq!(store.generate_recurring_instances(now()), 0);
    assert_eq!(store.len(), 3);
}

#[test]
fn generate_handles_weekly_patterns_end_to_end() {
    let mut store = TaskStore::new();
    let mut task = completed_daily_task(date(2026, 3, 2));
    task.recurrence = Some(Recurrence::new(RecurrenceRule::Weekly {
        interval: 1,
        days_of_week: BTreeSet::from([0, 6]),
    }));
    store.add_task(task);

    assert_eq!(store.generate_recurring_instances(now()), 1);
    // 2026-03-02 is a Monday; the next Saturday is 2026-03-07.
    assert_eq!(store.tasks()[1].due_date, Some(date(2026, 3, 7)));
}
