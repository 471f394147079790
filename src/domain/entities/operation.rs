//! Operation entity module
//!
//! This module defines the core Operation entity: one manufacturing step
//! belonging to a make method, scheduled by assigning it a start date, a
//! due date, a work center, and a priority.

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::RateUnit;

/// Lifecycle state of an operation.
///
/// Operations in `Done` or `Canceled` are excluded from scheduling and must
/// never be mutated by any component.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationStatus {
    Ready,
    InProgress,
    Paused,
    Waiting,
    Done,
    Canceled,
}

impl OperationStatus {
    /// `Done` and `Canceled` operations are excluded from scheduling.
    pub fn is_schedulable(self) -> bool {
        !matches!(self, OperationStatus::Done | OperationStatus::Canceled)
    }

    /// `InProgress` and `Paused` operations stay in the graph for
    /// reschedule runs but keep their previously assigned date/work center.
    pub fn is_pinned(self) -> bool {
        matches!(self, OperationStatus::InProgress | OperationStatus::Paused)
    }
}

/// Whether the operation is performed in-house or by an outside vendor.
///
/// `Outside` operations bypass work-center assignment entirely (§4.7).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationType {
    Inside,
    Outside,
}

/// Ordering marker relative to the preceding same-method operation.
///
/// `WithPrevious` groups an operation to run in parallel with the most
/// recent preceding operation that is itself `AfterPrevious` (§4.4, §9).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum OperationOrder {
    AfterPrevious,
    WithPrevious,
}

/// A time value paired with the rate unit it is expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RatedTime {
    pub time: Option<f64>,
    pub unit: Option<RateUnit>,
}

impl RatedTime {
    pub fn none() -> Self {
        Self { time: None, unit: None }
    }

    pub fn new(time: f64, unit: RateUnit) -> Self {
        Self { time: Some(time), unit: Some(unit) }
    }

    /// Hours contributed by this rated time given an operation quantity.
    ///
    /// A missing `time` or `unit` contributes zero hours (§4.1).
    pub fn to_hours(&self, quantity: f64) -> f64 {
        match (self.time, self.unit) {
            (Some(time), Some(unit)) => unit.to_hours(time, quantity),
            _ => 0.0,
        }
    }
}

impl Default for RatedTime {
    fn default() -> Self {
        Self::none()
    }
}

/// One manufacturing step belonging to a make method.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    pub id: String,
    pub job_id: String,
    pub make_method_id: String,
    pub order: i32,
    pub operation_order: OperationOrder,
    pub process_id: String,
    pub work_center_id: Option<String>,
    pub setup_time: RatedTime,
    pub labor_time: RatedTime,
    pub machine_time: RatedTime,
    pub quantity: Option<f64>,
    pub lead_time_days: Option<u32>,
    pub existing_start_date: Option<chrono::NaiveDate>,
    pub existing_due_date: Option<chrono::NaiveDate>,
    pub status: OperationStatus,
    pub operation_type: OperationType,
    /// Material id this operation consumes, if any — used by the Assembly
    /// Handler to resolve the parent operation a child method gates (§4.4).
    pub consumes_material_id: Option<String>,
    /// Job-level priority carried down for the Priority Assigner tie-break
    /// (§4.8); `None` sorts as `0`.
    pub job_priority: Option<i32>,
    pub deadline_type: Option<crate::domain::value_objects::DeadlineType>,
}

impl Operation {
    /// Quantity to use in duration math; missing quantity defaults to 1 (§4.1).
    pub fn effective_quantity(&self) -> f64 {
        self.quantity.unwrap_or(1.0)
    }

    /// `totalHours = setupHours + max(laborHours, machineHours)` — labor
    /// and machine time overlap (§4.1).
    pub fn total_hours(&self) -> f64 {
        let quantity = self.effective_quantity();
        let setup = self.setup_time.to_hours(quantity);
        let labor = self.labor_time.to_hours(quantity);
        let machine = self.machine_time.to_hours(quantity);
        setup + labor.max(machine)
    }

    /// `totalDays = max(ceil(totalHours / 8), 1)`.
    pub fn total_days(&self) -> u32 {
        let hours = self.total_hours();
        let days = (hours / 8.0).ceil();
        if days < 1.0 {
            1
        } else {
            days as u32
        }
    }

    pub fn is_schedulable(&self) -> bool {
        self.status.is_schedulable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_operation() -> Operation {
        Operation {
            id: "OP1".to_string(),
            job_id: "JOB1".to_string(),
            make_method_id: "MM1".to_string(),
            order: 1,
            operation_order: OperationOrder::AfterPrevious,
            process_id: "PROC1".to_string(),
            work_center_id: None,
            setup_time: RatedTime::none(),
            labor_time: RatedTime::none(),
            machine_time: RatedTime::none(),
            quantity: None,
            lead_time_days: None,
            existing_start_date: None,
            existing_due_date: None,
            status: OperationStatus::Ready,
            operation_type: OperationType::Inside,
            consumes_material_id: None,
            job_priority: None,
            deadline_type: None,
        }
    }

    #[test]
    fn duration_unit_mix_matches_scenario_six() {
        let mut op = base_operation();
        op.quantity = Some(3.0);
        op.setup_time = RatedTime::new(30.0, RateUnit::TotalMinutes);
        op.labor_time = RatedTime::new(2.0, RateUnit::HoursPerPiece);
        op.machine_time = RatedTime::new(1.0, RateUnit::HoursPerPiece);

        assert_eq!(op.total_hours(), 6.5);
        assert_eq!(op.total_days(), 1);
    }

    #[test]
    fn done_and_canceled_are_not_schedulable() {
        let mut op = base_operation();
        op.status = OperationStatus::Done;
        assert!(!op.is_schedulable());
        op.status = OperationStatus::Canceled;
        assert!(!op.is_schedulable());
        op.status = OperationStatus::Ready;
        assert!(op.is_schedulable());
    }

    #[test]
    fn in_progress_and_paused_are_pinned_but_schedulable() {
        assert!(OperationStatus::InProgress.is_schedulable());
        assert!(OperationStatus::InProgress.is_pinned());
        assert!(OperationStatus::Paused.is_pinned());
        assert!(!OperationStatus::Ready.is_pinned());
    }

    #[test]
    fn missing_time_or_unit_contributes_zero_hours() {
        let op = base_operation();
        assert_eq!(op.total_hours(), 0.0);
        assert_eq!(op.total_days(), 1);
    }
}
