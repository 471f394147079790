//! In-memory scheduling repository implementation
//!
//! An in-memory stand-in for the relational store the design places out of
//! scope (§6, §9). Used by the CLI demo and by the `ScheduleJob` tests;
//! never intended as a production adapter.

use std::collections::HashMap;

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::entities::{JobHeader, MakeMethod, Operation, Process, WorkCenter};
use crate::domain::repositories::{OperationUpdate, SchedulingRepository};

type JobKey = (String, String);

#[derive(Default)]
pub struct InMemorySchedulingRepository {
    method_trees: HashMap<JobKey, MakeMethod>,
    job_headers: HashMap<JobKey, JobHeader>,
    operations_by_job: HashMap<JobKey, Vec<String>>,
    all_operations: HashMap<String, Operation>,
    processes: HashMap<String, Vec<Process>>,
    work_centers: HashMap<String, Vec<WorkCenter>>,
    dependencies: HashMap<JobKey, Vec<(String, String)>>,
    updates: HashMap<String, OperationUpdate>,
}

impl InMemorySchedulingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_method_tree(&mut self, job_id: &str, company_id: &str, tree: MakeMethod) {
        self.method_trees.insert((job_id.to_string(), company_id.to_string()), tree);
    }

    pub fn seed_job_header(&mut self, job_id: &str, company_id: &str, header: JobHeader) {
        self.job_headers.insert((job_id.to_string(), company_id.to_string()), header);
    }

    pub fn seed_operations(&mut self, job_id: &str, company_id: &str, operations: Vec<Operation>) {
        let key = (job_id.to_string(), company_id.to_string());
        let ids = operations.iter().map(|op| op.id.clone()).collect();
        for op in operations {
            self.all_operations.insert(op.id.clone(), op);
        }
        self.operations_by_job.insert(key, ids);
    }

    pub fn seed_processes(&mut self, company_id: &str, processes: Vec<Process>) {
        self.processes.insert(company_id.to_string(), processes);
    }

    pub fn seed_work_centers(&mut self, company_id: &str, work_centers: Vec<WorkCenter>) {
        self.work_centers.insert(company_id.to_string(), work_centers);
    }

    /// Test/demo helper: the persisted schedule written by the last
    /// `update_operations` call, for operations belonging to `job_id`.
    pub fn scheduled_operations(&self, job_id: &str) -> HashMap<String, OperationUpdate> {
        self.all_operations
            .values()
            .filter(|op| op.job_id == job_id)
            .filter_map(|op| self.updates.get(&op.id).cloned().map(|update| (op.id.clone(), update)))
            .collect()
    }
}

impl SchedulingRepository for InMemorySchedulingRepository {
    fn load_method_tree(&self, job_id: &str, company_id: &str) -> Result<Option<MakeMethod>> {
        Ok(self.method_trees.get(&(job_id.to_string(), company_id.to_string())).cloned())
    }

    fn load_schedulable_operations(&self, job_id: &str, company_id: &str) -> Result<Vec<Operation>> {
        let ids = self
            .operations_by_job
            .get(&(job_id.to_string(), company_id.to_string()))
            .cloned()
            .unwrap_or_default();
        Ok(ids
            .into_iter()
            .filter_map(|id| self.all_operations.get(&id).cloned())
            .filter(Operation::is_schedulable)
            .collect())
    }

    fn load_processes(&self, company_id: &str) -> Result<Vec<Process>> {
        Ok(self.processes.get(company_id).cloned().unwrap_or_default())
    }

    fn load_active_work_centers(&self, company_id: &str, location_id: &str) -> Result<Vec<WorkCenter>> {
        Ok(self
            .work_centers
            .get(company_id)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|wc| wc.is_valid_at(location_id))
            .collect())
    }

    fn load_job_header(&self, job_id: &str, company_id: &str) -> Result<Option<JobHeader>> {
        Ok(self.job_headers.get(&(job_id.to_string(), company_id.to_string())).cloned())
    }

    fn load_work_center_hours(&self, _company_id: &str, work_center_id: &str, before_date: NaiveDate) -> Result<f64> {
        let total = self
            .updates
            .values()
            .filter(|update| update.work_center_id.as_deref() == Some(work_center_id))
            .filter(|update| update.start_date.map_or(true, |start| start <= before_date))
            .filter_map(|update| self.all_operations.get(&update.operation_id))
            .filter(|op| op.is_schedulable())
            .map(Operation::total_hours)
            .sum();
        Ok(total)
    }

    fn replace_dependencies(&mut self, job_id: &str, company_id: &str, edges: Vec<(String, String)>) -> Result<()> {
        self.dependencies.insert((job_id.to_string(), company_id.to_string()), edges);
        Ok(())
    }

    fn update_operations(&mut self, _company_id: &str, updates: Vec<OperationUpdate>) -> Result<()> {
        for update in updates {
            self.updates.insert(update.operation_id.clone(), update);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{OperationOrder, OperationStatus, OperationType, RatedTime};
    use crate::domain::value_objects::RateUnit;

    fn op(id: &str, job_id: &str) -> Operation {
        Operation {
            id: id.to_string(),
            job_id: job_id.to_string(),
            make_method_id: "MM1".to_string(),
            order: 1,
            operation_order: OperationOrder::AfterPrevious,
            process_id: "PROC1".to_string(),
            work_center_id: None,
            setup_time: RatedTime::new(8.0, RateUnit::TotalHours),
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
    fn done_and_canceled_operations_are_excluded_on_load() {
        let mut repo = InMemorySchedulingRepository::new();
        let mut done = op("DONE1", "JOB1");
        done.status = OperationStatus::Done;
        repo.seed_operations("JOB1", "CO1", vec![op("A", "JOB1"), done]);

        let loaded = repo.load_schedulable_operations("JOB1", "CO1").unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "A");
    }

    #[test]
    fn work_center_hours_sum_only_matching_and_due_operations() {
        let mut repo = InMemorySchedulingRepository::new();
        repo.seed_operations("JOB1", "CO1", vec![op("A", "JOB1"), op("B", "JOB1")]);
        repo.update_operations(
            "CO1",
            vec![
                OperationUpdate {
                    operation_id: "A".to_string(),
                    start_date: Some(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()),
                    due_date: None,
                    work_center_id: Some("W1".to_string()),
                    priority: 1,
                },
                OperationUpdate {
                    operation_id: "B".to_string(),
                    start_date: Some(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()),
                    due_date: None,
                    work_center_id: Some("W1".to_string()),
                    priority: 1,
                },
            ],
        )
        .unwrap();

        let hours = repo.load_work_center_hours("CO1", "W1", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()).unwrap();
        assert_eq!(hours, 8.0); // only "A" is due by the cutoff
    }
}
