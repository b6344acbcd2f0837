//! Persistence contracts and SQLite implementation.
//!
//! # Responsibility
//! - Define the load/save snapshot contract the core persists through.
//! - Isolate SQL and column mapping details from store/service logic.
//!
//! # Invariants
//! - Write paths must call `Task::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of
//!   masking it.

pub mod task_repo;
