//! Schedule Job use case — the Engine (§4.9)
//!
//! Orchestrates every other component through one invocation: build the
//! assembly tree, derive dependency edges, run the chosen scheduling
//! strategy, assign work centers, recompute priorities, and persist the
//! result. This is the single seam external callers (the CLI, eventually an
//! HTTP handler this crate does not build) go through.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::application::services::{
    AssemblyHandler, DependencyBuilder, DurationCalculator, PriorityAssigner, SchedulingDirection, WorkCenterSelector,
};
use crate::domain::entities::{DependencyGraph, Operation, ScheduledOperation, TraversalDirection};
use crate::domain::error::EngineError;
use crate::domain::repositories::{OperationUpdate, SchedulingRepository};

/// Whether a run may freely overwrite every operation's dates and priority,
/// or must preserve `In Progress`/`Paused` operations as pinned (§4.9).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    Initial,
    Reschedule,
}

#[derive(Debug, Clone)]
pub struct ScheduleJobRequest {
    pub job_id: String,
    pub company_id: String,
    pub user_id: String,
    pub mode: ScheduleMode,
    pub direction: SchedulingDirection,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleJobResult {
    pub operations_scheduled: usize,
    pub conflicts_detected: usize,
    pub work_centers_affected: Vec<String>,
    pub assembly_depth: u32,
}

impl ScheduleJobResult {
    fn empty() -> Self {
        Self {
            operations_scheduled: 0,
            conflicts_detected: 0,
            work_centers_affected: Vec::new(),
            assembly_depth: 0,
        }
    }
}

/// Holds the stateless component instances the pipeline calls through;
/// the Work-Center Selector is built per-invocation since it needs the
/// repository and the job's location.
pub struct ScheduleJob {
    dependency_builder: DependencyBuilder,
    assembly_handler: AssemblyHandler,
    duration_calculator: DurationCalculator,
    priority_assigner: PriorityAssigner,
}

impl ScheduleJob {
    pub fn new() -> Self {
        Self {
            dependency_builder: DependencyBuilder::new(),
            assembly_handler: AssemblyHandler::new(),
            duration_calculator: DurationCalculator::new(),
            priority_assigner: PriorityAssigner::new(),
        }
    }

    pub fn execute(
        &self,
        repository: &mut dyn SchedulingRepository,
        request: &ScheduleJobRequest,
        today: NaiveDate,
    ) -> Result<ScheduleJobResult, EngineError> {
        if request.job_id.trim().is_empty() || request.company_id.trim().is_empty() || request.user_id.trim().is_empty() {
            return Err(EngineError::InvalidInput("jobId, companyId and userId are all required".to_string()));
        }

        let Some(tree) = repository.load_method_tree(&request.job_id, &request.company_id)? else {
            return Ok(ScheduleJobResult::empty());
        };
        let Some(job_header) = repository.load_job_header(&request.job_id, &request.company_id)? else {
            return Ok(ScheduleJobResult::empty());
        };

        let operations = repository.load_schedulable_operations(&request.job_id, &request.company_id)?;
        if operations.is_empty() {
            return Ok(ScheduleJobResult::empty());
        }

        let operations_by_method = self.assembly_handler.group_by_method(&operations);

        let mut edges = Vec::new();
        let mut rank_mates: HashMap<String, String> = HashMap::new();
        for method_operations in operations_by_method.values() {
            edges.extend(self.dependency_builder.build_edges(method_operations));
            for (id, mate) in self.dependency_builder.rank_mates(method_operations) {
                rank_mates.insert(id.to_string(), mate.to_string());
            }
        }
        edges.extend(
            self.assembly_handler
                .build_cross_method_edges(&tree, &operations_by_method, &self.dependency_builder),
        );

        let mut graph = DependencyGraph::new();
        for op in &operations {
            graph.add_node(op.id.clone());
        }
        for (dependent, predecessor) in &edges {
            graph.add_dependency(dependent, predecessor);
        }

        repository.replace_dependencies(&request.job_id, &request.company_id, edges)?;

        let graph_direction = match request.direction {
            SchedulingDirection::Backward => TraversalDirection::Reverse,
            SchedulingDirection::Forward => TraversalDirection::Forward,
        };
        // Validates there is no cycle before the run commits to a walk order;
        // the strategy would otherwise discover the same cycle itself.
        graph
            .topological_sort(graph_direction)
            .map_err(|cycle| EngineError::CycleDetected(cycle.residual))?;

        let anchor = match request.direction {
            SchedulingDirection::Backward => job_header.due_date.unwrap_or(today),
            SchedulingDirection::Forward => job_header.start_date.unwrap_or(today),
        };

        let operation_map: HashMap<String, &Operation> = operations.iter().map(|op| (op.id.clone(), op)).collect();

        let seed = self.seed_pinned_operations(request.mode, &operations);

        let mut scheduled = crate::application::services::scheduling_strategy::run(
            request.direction,
            &operation_map,
            &graph,
            &rank_mates,
            anchor,
            today,
            seed,
        )?;

        let mut selector = WorkCenterSelector::new(repository, &request.company_id, &job_header.location_id)?;
        selector.select_work_centers_for_operations(&mut scheduled, &operation_map, today)?;

        self.priority_assigner.assign_priorities(&mut scheduled, &operation_map);

        let updates: Vec<OperationUpdate> = scheduled
            .values()
            .map(|entry| OperationUpdate {
                operation_id: entry.operation_id.clone(),
                start_date: entry.start_date,
                due_date: entry.due_date,
                work_center_id: entry.work_center_id.clone(),
                priority: entry.priority,
            })
            .collect();
        repository.update_operations(&request.company_id, updates)?;

        let conflicts_detected = scheduled.values().filter(|entry| entry.has_conflict).count();
        let mut work_centers_affected: Vec<String> = scheduled
            .values()
            .filter_map(|entry| entry.work_center_id.clone())
            .collect();
        work_centers_affected.sort();
        work_centers_affected.dedup();

        Ok(ScheduleJobResult {
            operations_scheduled: scheduled.len(),
            conflicts_detected,
            work_centers_affected,
            assembly_depth: self.assembly_handler.assembly_depth(&tree),
        })
    }

    /// On a reschedule run, `In Progress`/`Paused` operations already have a
    /// date and must keep it (§4.9). Operations missing a prior date are left
    /// out of the seed and scheduled normally.
    fn seed_pinned_operations(&self, mode: ScheduleMode, operations: &[Operation]) -> HashMap<String, ScheduledOperation> {
        let mut seed = HashMap::new();
        if mode != ScheduleMode::Reschedule {
            return seed;
        }
        for op in operations {
            if !op.status.is_pinned() {
                continue;
            }
            let (Some(start_date), Some(due_date)) = (op.existing_start_date, op.existing_due_date) else {
                continue;
            };
            let mut entry = ScheduledOperation::new(op.id.clone(), self.duration_calculator.total_hours(op), self.duration_calculator.total_days(op));
            entry.start_date = Some(start_date);
            entry.due_date = Some(due_date);
            entry.work_center_id = op.work_center_id.clone();
            seed.insert(op.id.clone(), entry);
        }
        seed
    }
}

impl Default for ScheduleJob {
    fn default() -> Self {
        Self::new()
    }
}
