//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Round-trip the full task collection, keyed by task id.
//! - Preserve every task and recurrence field without precision loss:
//!   timestamps as RFC 3339 text, dates as ISO `YYYY-MM-DD`, the
//!   recurrence pattern as a JSON column.
//!
//! # Invariants
//! - A NULL recurrence column loads as "no recurrence", never an error.
//! - `save` replaces the stored snapshot atomically (one transaction).

use crate::db::DbError;
use crate::model::recurrence::Recurrence;
use crate::model::task::{Task, TaskValidationError};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    id,
    title,
    completed,
    created_at,
    due_date,
    recurrence,
    last_generated
FROM tasks
ORDER BY position ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence error for task snapshot operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Snapshot persistence contract consumed by the service layer.
pub trait TaskRepository {
    fn load(&self) -> RepoResult<Vec<Task>>;
    fn save(&mut self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository {
    conn: Connection,
}

impl SqliteTaskRepository {
    /// Wraps a bootstrapped connection (see [`crate::db::open_db`]).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository {
    fn load(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(TASK_SELECT_SQL)?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        Ok(tasks)
    }

    fn save(&mut self, tasks: &[Task]) -> RepoResult<()> {
        for task in tasks {
            task.validate()?;
        }

        let tx = self.conn.transaction().map_err(DbError::Sqlite)?;
        tx.execute("DELETE FROM tasks;", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO tasks (
                    id,
                    title,
                    completed,
                    created_at,
                    due_date,
                    recurrence,
                    last_generated,
                    position
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            )?;

            for (position, task) in tasks.iter().enumerate() {
                stmt.execute(params![
                    task.id.to_string(),
                    task.title.as_str(),
                    bool_to_int(task.completed),
                    task.created_at.to_rfc3339(),
                    task.due_date.map(|date| date.to_string()),
                    recurrence_to_json(task.recurrence.as_ref())?,
                    task.last_generated.map(|date| date.to_string()),
                    i64::try_from(position).map_err(|_| {
                        RepoError::InvalidData("task collection too large".to_string())
                    })?,
                ])?;
            }
        }
        tx.commit().map_err(DbError::Sqlite)?;

        Ok(())
    }
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in tasks.id"))
    })?;

    let created_at_text: String = row.get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_text)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|_| {
            RepoError::InvalidData(format!(
                "invalid timestamp `{created_at_text}` in tasks.created_at"
            ))
        })?;

    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid completed value `{other}` in tasks.completed"
            )));
        }
    };

    let task = Task {
        id,
        title: row.get("title")?,
        completed,
        created_at,
        due_date: parse_date_column(row, "due_date")?,
        recurrence: parse_recurrence_column(row)?,
        last_generated: parse_date_column(row, "last_generated")?,
    };
    task.validate()?;
    Ok(task)
}

fn parse_date_column(row: &Row<'_>, column: &str) -> RepoResult<Option<NaiveDate>> {
    match row.get::<_, Option<String>>(column)? {
        Some(text) => {
            let date = text.parse::<NaiveDate>().map_err(|_| {
                RepoError::InvalidData(format!("invalid date `{text}` in tasks.{column}"))
            })?;
            Ok(Some(date))
        }
        None => Ok(None),
    }
}

fn parse_recurrence_column(row: &Row<'_>) -> RepoResult<Option<Recurrence>> {
    match row.get::<_, Option<String>>("recurrence")? {
        Some(json) => {
            let recurrence = serde_json::from_str(&json).map_err(|err| {
                RepoError::InvalidData(format!("invalid recurrence json in tasks.recurrence: {err}"))
            })?;
            Ok(Some(recurrence))
        }
        None => Ok(None),
    }
}

fn recurrence_to_json(recurrence: Option<&Recurrence>) -> RepoResult<Option<String>> {
    match recurrence {
        Some(recurrence) => {
            let json = serde_json::to_string(recurrence).map_err(|err| {
                RepoError::InvalidData(format!("recurrence not serializable: {err}"))
            })?;
            Ok(Some(json))
        }
        None => Ok(None),
    }
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
