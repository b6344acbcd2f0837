//! Pure recurrence computation.
//!
//! # Responsibility
//! - Compute the next occurrence date for a recurrence rule.
//! - Keep all calendar irregularity handling (month lengths, leap
//!   years, weekday search) in one leaf module.
//!
//! # Invariants
//! - No I/O, no clock access; results depend only on the inputs.
//! - End-date cutoff and duplicate-generation bookkeeping belong to
//!   the store, never to this module.

mod engine;

pub use engine::{days_in_month, next_occurrence};
