//! In-memory task collection and mutation operations.
//!
//! # Responsibility
//! - Hold the ordered task collection and apply CRUD mutations.
//! - Drive the recurrence engine for completed recurring tasks and
//!   merge spawned instances back into the collection.
//!
//! # Invariants
//! - Mutations targeting an unknown id are silent no-ops.
//! - `generate_recurring_instances` is idempotent: a completed task
//!   spawns each occurrence date at most once (`last_generated`).
//! - Spawned instances are appended in one batch after the scan, so
//!   new tasks are never re-examined within the same pass.

use crate::model::recurrence::Recurrence;
use crate::model::task::{Task, TaskId};
use crate::recur::next_occurrence;
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info};

/// Partial update applied by [`TaskStore::update_task`].
///
/// Outer `None` means "leave unchanged"; for the nullable task fields
/// the inner `Option` distinguishes setting from clearing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<Option<NaiveDate>>,
    pub recurrence: Option<Option<Recurrence>>,
}

/// Ordered in-memory task collection.
///
/// Insertion order is retained but carries no semantic meaning;
/// consumers re-sort for display.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from previously persisted tasks.
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Returns the first task with the given id.
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Appends a task. Ids are not deduplicated; the caller owns id
    /// uniqueness (fresh uuids make collisions practically impossible).
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Flips the completion flag of the task with `id`; no-op when the
    /// id is unknown.
    pub fn toggle_task(&mut self, id: TaskId) {
        if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
            task.completed = !task.completed;
        }
    }

    /// Shallow-merges `patch` into the task with `id`; no-op when the
    /// id is unknown.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            return;
        };
        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(completed) = patch.completed {
            task.completed = completed;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(recurrence) = patch.recurrence {
            task.recurrence = recurrence;
        }
    }

    /// Removes the task with `id`; no-op when the id is unknown.
    pub fn delete_task(&mut self, id: TaskId) {
        self.tasks.retain(|task| task.id != id);
    }

    /// Spawns next occurrences for completed recurring tasks.
    ///
    /// A task qualifies when it is completed, has a recurrence and has
    /// a due date. Its next occurrence is staged unless it falls on or
    /// after the pattern's end date, or the task already spawned that
    /// occurrence (`last_generated`). Staged tasks are appended in one
    /// batch; each source task is stamped with the spawned date.
    ///
    /// Returns the number of spawned instances.
    pub fn generate_recurring_instances(&mut self, now: DateTime<Utc>) -> usize {
        let mut spawned: Vec<Task> = Vec::new();
        let mut stamps: Vec<(usize, NaiveDate)> = Vec::new();

        for (index, task) in self.tasks.iter().enumerate() {
            if !task.is_recurrence_eligible() {
                continue;
            }
            // Eligibility guarantees both fields are present.
            let (Some(due_date), Some(recurrence)) = (task.due_date, task.recurrence.as_ref())
            else {
                continue;
            };
            let Some(next) = next_occurrence(due_date, recurrence) else {
                debug!(
                    "event=recurring_scan module=store status=skipped reason=no_next_date task={}",
                    task.id
                );
                continue;
            };
            if recurrence.end_date.is_some_and(|end| next >= end) {
                continue;
            }
            if task.last_generated.is_some_and(|last| last >= next) {
                continue;
            }

            spawned.push(task.next_instance(next, now));
            stamps.push((index, next));
        }

        for (index, date) in stamps {
            self.tasks[index].last_generated = Some(date);
        }

        let count = spawned.len();
        if count > 0 {
            info!("event=recurring_scan module=store status=ok spawned={count}");
        }
        self.tasks.extend(spawned);
        count
    }
}
