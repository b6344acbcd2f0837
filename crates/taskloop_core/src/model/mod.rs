//! Domain model for tasks and their recurrence rules.
//!
//! # Responsibility
//! - Define the canonical task record shared by store, service and repo.
//! - Define the recurrence rule sum type consumed by the engine.
//!
//! # Invariants
//! - Every task is identified by a stable `TaskId`.
//! - Recurrence data irrelevant to the active frequency is
//!   unrepresentable: each rule variant carries only its own fields.

pub mod recurrence;
pub mod task;
