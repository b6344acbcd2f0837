//! Recurrence rule model.
//!
//! # Responsibility
//! - Describe how a task repeats: frequency, interval and the
//!   frequency-specific refinements.
//! - Keep the wire shape compatible with the JSON schema used by
//!   external clients (`frequency` tag, camelCase refinement fields).
//!
//! # Invariants
//! - `interval` defaults to 1 when omitted on the wire.
//! - `end_date` is an exclusive upper bound on generated occurrences;
//!   enforcement belongs to the store, not the engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Unit selector for `RecurrenceRule::Custom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomUnit {
    Day,
    Week,
    Month,
    Year,
}

/// Frequency-keyed recurrence rule.
///
/// Modeled as a tagged sum type so a rule can only carry the fields its
/// frequency actually uses. Unknown extra fields on the wire (left over
/// from a client switching frequencies) are ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "frequency", rename_all = "lowercase")]
pub enum RecurrenceRule {
    /// Every `interval` days.
    Daily {
        #[serde(default = "default_interval")]
        interval: u32,
    },
    /// On specific weekdays (0=Sunday..6=Saturday), or every `interval`
    /// weeks when the weekday set is empty.
    Weekly {
        #[serde(default = "default_interval")]
        interval: u32,
        #[serde(rename = "daysOfWeek", default)]
        days_of_week: BTreeSet<u8>,
    },
    /// Every `interval` months, optionally pinned to a day of month
    /// (1-31, clamped to the target month length).
    Monthly {
        #[serde(default = "default_interval")]
        interval: u32,
        #[serde(rename = "dayOfMonth", default)]
        day_of_month: Option<u8>,
    },
    /// Every `interval` years, optionally pinned to a month (1-12) and
    /// day of month.
    Yearly {
        #[serde(default = "default_interval")]
        interval: u32,
        #[serde(rename = "dayOfMonth", default)]
        day_of_month: Option<u8>,
        #[serde(rename = "monthOfYear", default)]
        month_of_year: Option<u8>,
    },
    /// Every `interval` of a caller-chosen unit; absent unit means days.
    Custom {
        #[serde(default = "default_interval")]
        interval: u32,
        #[serde(default)]
        unit: Option<CustomUnit>,
    },
}

/// Full recurrence pattern: the rule plus the rule-independent cutoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
    #[serde(flatten)]
    pub rule: RecurrenceRule,
    /// Exclusive upper bound: occurrences on or after this date are
    /// discarded by the store.
    #[serde(rename = "endDate", default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Recurrence {
    /// Creates a pattern with no end date.
    pub fn new(rule: RecurrenceRule) -> Self {
        Self {
            rule,
            end_date: None,
        }
    }

    /// Creates a pattern that stops producing occurrences at `end_date`
    /// (exclusive).
    pub fn ending(rule: RecurrenceRule, end_date: NaiveDate) -> Self {
        Self {
            rule,
            end_date: Some(end_date),
        }
    }
}

fn default_interval() -> u32 {
    1
}
