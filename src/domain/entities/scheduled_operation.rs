//! Scheduled operation entity module
//!
//! An operation augmented with the dates, work center and priority the
//! Scheduling Strategy, Work-Center Selector and Priority Assigner resolve
//! for it. Created by the strategy, mutated by the later stages, discarded
//! once the engine persists the run (§3).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The two dates a backward-mode conflict names: the computed start date
/// and the date it was compared against (today).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConflictReason {
    pub computed_start_date: NaiveDate,
    pub compared_against: NaiveDate,
}

impl std::fmt::Display for ConflictReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "computed start date {} is before {}",
            self.computed_start_date, self.compared_against
        )
    }
}

/// An operation with its resolved schedule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScheduledOperation {
    pub operation_id: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub work_center_id: Option<String>,
    pub priority: i32,
    pub duration_hours: f64,
    pub duration_days: u32,
    pub has_conflict: bool,
    pub conflict_reason: Option<ConflictReason>,
    /// Set when the Work-Center Selector found no eligible work center for
    /// this operation's process (§7: non-fatal, recorded per-operation,
    /// the rest of the run still schedules).
    pub work_center_error: Option<String>,
}

impl ScheduledOperation {
    pub fn new(operation_id: impl Into<String>, duration_hours: f64, duration_days: u32) -> Self {
        Self {
            operation_id: operation_id.into(),
            start_date: None,
            due_date: None,
            work_center_id: None,
            priority: 0,
            duration_hours,
            duration_days,
            has_conflict: false,
            conflict_reason: None,
            work_center_error: None,
        }
    }
}
