//! Priority Assigner service module
//!
//! Recomputes `1, 2, 3, …` priorities per work-center bucket once every
//! operation has dates and a work center (§4.8).

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::domain::entities::{Operation, ScheduledOperation};
use crate::domain::value_objects::DeadlineType;

#[derive(Debug, Default, Clone, Copy)]
pub struct PriorityAssigner;

impl PriorityAssigner {
    pub fn new() -> Self {
        Self
    }

    /// Partitions `scheduled` by `workCenterId` (null is its own bucket) and
    /// assigns sequential priorities within each bucket, ordered by
    /// `startDate` (nulls last), then `jobPriority` (nulls as `0`), then the
    /// fixed `deadlineType` ranking (null as `NoDeadline`).
    pub fn assign_priorities(&self, scheduled: &mut HashMap<String, ScheduledOperation>, operation_map: &HashMap<String, &Operation>) {
        let mut buckets: HashMap<Option<String>, Vec<String>> = HashMap::new();
        for (id, entry) in scheduled.iter() {
            buckets.entry(entry.work_center_id.clone()).or_default().push(id.clone());
        }

        for mut ids in buckets.into_values() {
            ids.sort_by(|a, b| self.compare(a, b, scheduled, operation_map));
            for (index, id) in ids.into_iter().enumerate() {
                if let Some(entry) = scheduled.get_mut(&id) {
                    entry.priority = (index + 1) as i32;
                }
            }
        }
    }

    fn compare(
        &self,
        a: &str,
        b: &str,
        scheduled: &HashMap<String, ScheduledOperation>,
        operation_map: &HashMap<String, &Operation>,
    ) -> Ordering {
        let start_a = scheduled.get(a).and_then(|s| s.start_date);
        let start_b = scheduled.get(b).and_then(|s| s.start_date);
        let start_order = match (start_a, start_b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if start_order != Ordering::Equal {
            return start_order;
        }

        let priority_a = operation_map.get(a).and_then(|op| op.job_priority).unwrap_or(0);
        let priority_b = operation_map.get(b).and_then(|op| op.job_priority).unwrap_or(0);
        let priority_order = priority_a.cmp(&priority_b);
        if priority_order != Ordering::Equal {
            return priority_order;
        }

        let deadline_a = DeadlineType::or_default(operation_map.get(a).and_then(|op| op.deadline_type));
        let deadline_b = DeadlineType::or_default(operation_map.get(b).and_then(|op| op.deadline_type));
        deadline_a.cmp(&deadline_b)
    }

    /// `(before + after) / 2`, for inserting one operation between two
    /// already-assigned priorities outside the batch flow.
    pub fn calculate_fractional_priority(&self, before: i32, after: i32) -> f64 {
        (before as f64 + after as f64) / 2.0
    }
}
