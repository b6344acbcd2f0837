//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record and its lifecycle helpers.
//! - Keep recurrence bookkeeping (`last_generated`) next to the data it
//!   guards.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `title` is non-empty after trimming (`validate`).
//! - Completing a recurring task never mutates anything on the source
//!   beyond `completed` and `last_generated`; the next occurrence is
//!   always a fresh task.

use crate::model::recurrence::Recurrence;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failures for task data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyTitle,
    NilId,
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title must not be empty"),
            Self::NilId => write!(f, "task id must not be the nil uuid"),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID used for mutation targeting and persistence keys.
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    /// Reference date for recurrence computation. A recurring task
    /// without a due date is valid but never spawns an occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<Recurrence>,
    /// Most recent occurrence date already spawned from this task.
    /// Guards the periodic scan against duplicate generation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_generated: Option<NaiveDate>,
}

impl Task {
    /// Creates a new task with a generated stable ID.
    ///
    /// Optional fields start empty; `completed` starts `false`.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, created_at)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    /// Does not validate; call [`Task::validate`] before persisting.
    pub fn with_id(id: TaskId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            completed: false,
            created_at,
            due_date: None,
            recurrence: None,
            last_generated: None,
        }
    }

    /// Checks model invariants ahead of persistence.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        Ok(())
    }

    /// Returns whether this task can spawn a next occurrence: it must be
    /// completed, recurring, and carry a reference due date.
    pub fn is_recurrence_eligible(&self) -> bool {
        self.completed && self.recurrence.is_some() && self.due_date.is_some()
    }

    /// Builds the next occurrence of this task as a fresh record.
    ///
    /// The spawned task keeps the title and recurrence pattern, gets a
    /// new ID, starts uncompleted, and is due on `occurrence`.
    pub fn next_instance(&self, occurrence: NaiveDate, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: self.title.clone(),
            completed: false,
            created_at,
            due_date: Some(occurrence),
            recurrence: self.recurrence.clone(),
            last_generated: None,
        }
    }
}
