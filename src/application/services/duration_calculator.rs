//! Duration Calculator service module
//!
//! Converts an operation's recorded `(time, rate unit, quantity)` tuples
//! into hours and whole business days (§4.1). The per-tuple conversion
//! lives on `RateUnit`/`RatedTime`; this service is the component boundary
//! the Engine and other services call through.

use crate::domain::entities::Operation;

/// Stateless service wrapping the duration contract on `Operation`.
///
/// Kept as its own component (rather than inlined at call sites) so the
/// Scheduling Strategy and Work-Center Selector depend on one seam for
/// duration math, matching the component boundary in the design.
#[derive(Debug, Default, Clone, Copy)]
pub struct DurationCalculator;

impl DurationCalculator {
    pub fn new() -> Self {
        Self
    }

    /// `totalHours = setupHours + max(laborHours, machineHours)`.
    pub fn total_hours(&self, operation: &Operation) -> f64 {
        operation.total_hours()
    }

    /// `totalDays = max(ceil(totalHours / 8), 1)`.
    pub fn total_days(&self, operation: &Operation) -> u32 {
        operation.total_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OperationOrder, OperationStatus, OperationType, RatedTime};
    use crate::domain::value_objects::RateUnit;

    fn operation_with(setup: RatedTime, labor: RatedTime, machine: RatedTime, quantity: Option<f64>) -> Operation {
        Operation {
            id: "OP".to_string(),
            job_id: "JOB".to_string(),
            make_method_id: "MM".to_string(),
            order: 1,
            operation_order: OperationOrder::AfterPrevious,
            process_id: "PROC".to_string(),
            work_center_id: None,
            setup_time: setup,
            labor_time: labor,
            machine_time: machine,
            quantity,
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
    fn labor_and_machine_overlap_takes_the_max() {
        let op = operation_with(
            RatedTime::none(),
            RatedTime::new(5.0, RateUnit::TotalHours),
            RatedTime::new(8.0, RateUnit::TotalHours),
            None,
        );
        let calc = DurationCalculator::new();
        assert_eq!(calc.total_hours(&op), 8.0);
    }

    #[test]
    fn rounds_up_to_whole_days_minimum_one() {
        let op = operation_with(
            RatedTime::new(1.0, RateUnit::TotalHours),
            RatedTime::none(),
            RatedTime::none(),
            None,
        );
        let calc = DurationCalculator::new();
        assert_eq!(calc.total_days(&op), 1);

        let op = operation_with(
            RatedTime::new(9.0, RateUnit::TotalHours),
            RatedTime::none(),
            RatedTime::none(),
            None,
        );
        assert_eq!(calc.total_days(&op), 2);
    }

    #[test]
    fn missing_quantity_defaults_to_one() {
        let op = operation_with(
            RatedTime::none(),
            RatedTime::new(2.0, RateUnit::HoursPerPiece),
            RatedTime::none(),
            None,
        );
        let calc = DurationCalculator::new();
        assert_eq!(calc.total_hours(&op), 2.0);
    }
}
