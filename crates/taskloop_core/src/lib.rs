//! Core domain logic for the taskloop recurring-task tracker.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod recur;
pub mod repo;
pub mod scheduler;
pub mod service;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{load_config, ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::recurrence::{CustomUnit, Recurrence, RecurrenceRule};
pub use model::task::{Task, TaskId, TaskValidationError};
pub use recur::{days_in_month, next_occurrence};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use scheduler::{Scheduler, DEFAULT_SCAN_PERIOD};
pub use service::task_service::TaskService;
pub use store::{TaskPatch, TaskStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
