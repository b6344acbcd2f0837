//! Task use-case service.
//!
//! # Responsibility
//! - Provide stable mutation entry points over the in-memory store.
//! - Persist a snapshot after every mutation.
//!
//! # Invariants
//! - Local mutation is optimistic: a failed save is logged and
//!   surfaced, but the in-memory state is not rolled back. The caller
//!   decides whether to retry.
//! - `created_at` always comes from the injected clock.

use crate::clock::Clock;
use crate::model::recurrence::Recurrence;
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use crate::store::{TaskPatch, TaskStore};
use chrono::NaiveDate;
use log::{error, info};

/// Use-case service wrapper tying the store to a repository and clock.
pub struct TaskService<R: TaskRepository, C: Clock> {
    store: TaskStore,
    repo: R,
    clock: C,
}

impl<R: TaskRepository, C: Clock> TaskService<R, C> {
    /// Loads the persisted task collection into a fresh service.
    pub fn load(repo: R, clock: C) -> RepoResult<Self> {
        let tasks = repo.load()?;
        info!(
            "event=service_load module=service status=ok tasks={}",
            tasks.len()
        );
        Ok(Self {
            store: TaskStore::from_tasks(tasks),
            repo,
            clock,
        })
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.store.get(id)
    }

    /// Creates a task with a fresh id and clock-driven `created_at`.
    ///
    /// # Errors
    /// - `RepoError::Validation` when the title is blank.
    /// - Persistence errors from the snapshot save.
    pub fn create_task(
        &mut self,
        title: impl Into<String>,
        due_date: Option<NaiveDate>,
        recurrence: Option<Recurrence>,
    ) -> RepoResult<TaskId> {
        let mut task = Task::new(title, self.clock.now());
        task.due_date = due_date;
        task.recurrence = recurrence;
        task.validate()?;

        let id = task.id;
        self.store.add_task(task);
        self.persist()?;
        Ok(id)
    }

    /// Flips the completion flag; unknown ids are a silent no-op.
    pub fn toggle_task(&mut self, id: TaskId) -> RepoResult<()> {
        self.store.toggle_task(id);
        self.persist()
    }

    /// Shallow-merges `patch` into the task; unknown ids are a silent
    /// no-op.
    pub fn update_task(&mut self, id: TaskId, patch: TaskPatch) -> RepoResult<()> {
        self.store.update_task(id, patch);
        self.persist()
    }

    /// Removes the task; unknown ids are a silent no-op.
    pub fn delete_task(&mut self, id: TaskId) -> RepoResult<()> {
        self.store.delete_task(id);
        self.persist()
    }

    /// Runs one recurrence scan and persists the result.
    ///
    /// Returns the number of spawned instances.
    pub fn generate_recurring_instances(&mut self) -> RepoResult<usize> {
        let spawned = self.store.generate_recurring_instances(self.clock.now());
        self.persist()?;
        Ok(spawned)
    }

    fn persist(&mut self) -> RepoResult<()> {
        if let Err(err) = self.repo.save(self.store.tasks()) {
            error!("event=snapshot_save module=service status=error error={err}");
            return Err(err);
        }
        Ok(())
    }
}
