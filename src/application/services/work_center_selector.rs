//! Work-Center Selector service module
//!
//! Assigns each schedulable, in-house operation to the eligible work center
//! carrying the lowest load, live-read from storage plus an in-memory tally
//! accumulated over the run (§4.7).

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::domain::entities::{Operation, OperationType, ScheduledOperation};
use crate::domain::error::EngineError;
use crate::domain::repositories::SchedulingRepository;

/// Built once per engine run against a company/location pair; holds the
/// process → eligible-work-center map and the run-scoped load tally.
pub struct WorkCenterSelector<'a> {
    repository: &'a dyn SchedulingRepository,
    company_id: String,
    eligible_by_process: HashMap<String, Vec<String>>,
    tally: HashMap<String, f64>,
}

impl<'a> WorkCenterSelector<'a> {
    /// Loads every process and every active, colocated work center, and
    /// narrows each process's eligible list to the intersection.
    pub fn new(repository: &'a dyn SchedulingRepository, company_id: &str, location_id: &str) -> anyhow::Result<Self> {
        let processes = repository.load_processes(company_id)?;
        let work_centers = repository.load_active_work_centers(company_id, location_id)?;

        let valid_ids: std::collections::HashSet<String> = work_centers
            .into_iter()
            .filter(|wc| wc.is_valid_at(location_id))
            .map(|wc| wc.id)
            .collect();

        let eligible_by_process = processes
            .into_iter()
            .map(|process| {
                let ids = process
                    .eligible_work_center_ids
                    .into_iter()
                    .filter(|id| valid_ids.contains(id))
                    .collect();
                (process.id, ids)
            })
            .collect();

        Ok(Self {
            repository,
            company_id: company_id.to_string(),
            eligible_by_process,
            tally: HashMap::new(),
        })
    }

    /// Eligible work center with the lowest (persisted + in-run) load,
    /// `before_date` defaulting to today at the call site when absent.
    pub fn select_work_center(&self, process_id: &str, before_date: NaiveDate) -> Result<String, EngineError> {
        let candidates = self
            .eligible_by_process
            .get(process_id)
            .ok_or_else(|| EngineError::NoEligibleWorkCenter {
                process_id: process_id.to_string(),
                reason: "process id not found".to_string(),
            })?;

        if candidates.is_empty() {
            return Err(EngineError::NoEligibleWorkCenter {
                process_id: process_id.to_string(),
                reason: "no active, colocated work center is eligible".to_string(),
            });
        }

        let mut best: Option<(String, f64)> = None;
        for work_center_id in candidates {
            let persisted = self
                .repository
                .load_work_center_hours(&self.company_id, work_center_id, before_date)?;
            let load = persisted + self.tally.get(work_center_id).copied().unwrap_or(0.0);
            best = Some(match best {
                None => (work_center_id.clone(), load),
                Some((best_id, best_load)) if load < best_load => (work_center_id.clone(), best_load.min(load)),
                Some(current) => current,
            });
        }

        best.map(|(id, _)| id).ok_or_else(|| EngineError::NoEligibleWorkCenter {
            process_id: process_id.to_string(),
            reason: "evaluation yielded no candidate".to_string(),
        })
    }

    /// Resets the tally, assigns a work center to every in-house operation
    /// (skipping `Outside` ones), processed in `startDate`-ascending order
    /// (nulls last) so earlier operations bias the tally for later ones.
    ///
    /// An operation that already carries a `workCenterId` (a pinned,
    /// previously scheduled operation on a reschedule run) is not
    /// reassigned, but its duration still counts toward that work center's
    /// tally so downstream assignments see its true load.
    ///
    /// `NoEligibleWorkCenter` is non-fatal (§7): it is recorded on the
    /// individual operation and the rest of the run still schedules.
    /// `StorageError` is fatal and aborts the whole call.
    pub fn select_work_centers_for_operations(
        &mut self,
        scheduled: &mut HashMap<String, ScheduledOperation>,
        operation_map: &HashMap<String, &Operation>,
        today: NaiveDate,
    ) -> Result<(), EngineError> {
        self.tally.clear();

        let mut ids: Vec<String> = scheduled.keys().cloned().collect();
        ids.sort_by(|a, b| {
            let start_a = scheduled.get(a).and_then(|s| s.start_date);
            let start_b = scheduled.get(b).and_then(|s| s.start_date);
            match (start_a, start_b) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        for id in ids {
            let Some(&op) = operation_map.get(&id) else { continue };
            if op.operation_type == OperationType::Outside {
                continue;
            }

            let duration_hours = scheduled.get(&id).map(|s| s.duration_hours).unwrap_or(0.0);

            if let Some(existing) = scheduled.get(&id).and_then(|s| s.work_center_id.clone()) {
                *self.tally.entry(existing).or_insert(0.0) += duration_hours;
                continue;
            }

            let before_date = scheduled.get(&id).and_then(|s| s.start_date).unwrap_or(today);
            match self.select_work_center(&op.process_id, before_date) {
                Ok(work_center_id) => {
                    *self.tally.entry(work_center_id.clone()).or_insert(0.0) += duration_hours;
                    if let Some(entry) = scheduled.get_mut(&id) {
                        entry.work_center_id = Some(work_center_id);
                    }
                }
                Err(err @ EngineError::StorageError(_)) => return Err(err),
                Err(err) => {
                    if let Some(entry) = scheduled.get_mut(&id) {
                        entry.work_center_error = Some(err.to_string());
                    }
                }
            }
        }

        Ok(())
    }
}
