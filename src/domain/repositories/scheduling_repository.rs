//! Scheduling repository port
//!
//! The storage port the Engine reads and writes through. A real
//! implementation is an external collaborator (a relational schema behind
//! row-level security) that this crate does not build; only the trait and
//! one in-memory adapter (for the CLI and tests) live here.

use anyhow::Result;
use chrono::NaiveDate;

use crate::domain::entities::{JobHeader, MakeMethod, Operation, Process, WorkCenter};

/// One row of the write-phase batch that updates an operation's resolved
/// schedule.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationUpdate {
    pub operation_id: String,
    pub start_date: Option<NaiveDate>,
    pub due_date: Option<NaiveDate>,
    pub work_center_id: Option<String>,
    pub priority: i32,
}

pub trait SchedulingRepository {
    /// Loads the method tree rooted at the job's root make method (the one
    /// with a null parent material id).
    fn load_method_tree(&self, job_id: &str, company_id: &str) -> Result<Option<MakeMethod>>;

    /// Loads every operation for the job, excluding `Done`/`Canceled`.
    fn load_schedulable_operations(&self, job_id: &str, company_id: &str) -> Result<Vec<Operation>>;

    /// Loads every process with its eligible work-center ids.
    fn load_processes(&self, company_id: &str) -> Result<Vec<Process>>;

    /// Loads every active work center at a location.
    fn load_active_work_centers(&self, company_id: &str, location_id: &str) -> Result<Vec<WorkCenter>>;

    /// Loads the job header (anchor dates, location, priority, deadline type).
    fn load_job_header(&self, job_id: &str, company_id: &str) -> Result<Option<JobHeader>>;

    /// Sum of `durationHours` of all non-`Done`/non-`Canceled` operations on
    /// `work_center_id` whose start date is null or `<= before_date`,
    /// already persisted (the in-memory run tally is added on top by the
    /// Work-Center Selector, not here).
    fn load_work_center_hours(
        &self,
        company_id: &str,
        work_center_id: &str,
        before_date: NaiveDate,
    ) -> Result<f64>;

    /// Replaces the entire dependency edge set for a job (atomic per job).
    fn replace_dependencies(
        &mut self,
        job_id: &str,
        company_id: &str,
        edges: Vec<(String, String)>,
    ) -> Result<()>;

    /// Applies the batch of operation row updates (atomic per call).
    fn update_operations(&mut self, company_id: &str, updates: Vec<OperationUpdate>) -> Result<()>;
}
