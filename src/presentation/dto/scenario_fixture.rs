//! Scenario fixture DTO
//!
//! The on-disk shape the CLI demo loads: everything a real deployment would
//! pull from the relational store behind `SchedulingRepository` (§6), bundled
//! into one JSON document so the engine can be exercised without a database.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{JobHeader, MakeMethod, Operation, Process, WorkCenter};
use crate::infrastructure::repositories::InMemorySchedulingRepository;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioFixture {
    pub job_header: JobHeader,
    pub method_tree: MakeMethod,
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub processes: Vec<Process>,
    #[serde(default)]
    pub work_centers: Vec<WorkCenter>,
}

impl ScenarioFixture {
    /// Seeds a fresh in-memory repository with this fixture's rows, keyed
    /// under the header's own job/company id.
    pub fn into_repository(self) -> InMemorySchedulingRepository {
        let mut repo = InMemorySchedulingRepository::new();
        let job_id = self.job_header.job_id.clone();
        let company_id = self.job_header.company_id.clone();

        repo.seed_method_tree(&job_id, &company_id, self.method_tree);
        repo.seed_operations(&job_id, &company_id, self.operations);
        repo.seed_processes(&company_id, self.processes);
        repo.seed_work_centers(&company_id, self.work_centers);
        repo.seed_job_header(&job_id, &company_id, self.job_header);
        repo
    }
}
