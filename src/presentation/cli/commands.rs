//! CLI Commands module
//!
//! Command implementation for the `schedule` subcommand: load a scenario
//! fixture, run the Engine, and print the resulting response.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::application::services::SchedulingDirection;
use crate::application::use_cases::{ScheduleJob, ScheduleJobRequest, ScheduleMode};
use crate::presentation::cli::{CliScheduleDirection, CliScheduleMode};
use crate::presentation::dto::{ScenarioFixture, ScheduleResponse};

impl From<CliScheduleMode> for ScheduleMode {
    fn from(mode: CliScheduleMode) -> Self {
        match mode {
            CliScheduleMode::Initial => ScheduleMode::Initial,
            CliScheduleMode::Reschedule => ScheduleMode::Reschedule,
        }
    }
}

impl From<CliScheduleDirection> for SchedulingDirection {
    fn from(direction: CliScheduleDirection) -> Self {
        match direction {
            CliScheduleDirection::Backward => SchedulingDirection::Backward,
            CliScheduleDirection::Forward => SchedulingDirection::Forward,
        }
    }
}

pub struct ScheduleCommand;

impl ScheduleCommand {
    /// Executes the schedule command.
    ///
    /// Loads a scenario fixture, runs the Engine against it, and writes the
    /// resulting [`ScheduleResponse`] either to `output_path` or stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the fixture cannot be read or parsed, or if
    /// writing the response fails. A failed scheduling run is not an error
    /// at this layer — it is reported as a `ScheduleResponse::Failure`.
    pub fn execute<P: AsRef<Path>>(
        input_path: P,
        user_id: &str,
        mode: CliScheduleMode,
        direction: CliScheduleDirection,
        output_path: Option<P>,
    ) -> Result<()> {
        info!("Loading scenario fixture: {:?}", input_path.as_ref());
        let raw = fs::read_to_string(&input_path).context("Failed to read scenario fixture")?;
        let fixture: ScenarioFixture = serde_json::from_str(&raw).context("Failed to parse scenario fixture")?;

        let job_id = fixture.job_header.job_id.clone();
        let company_id = fixture.job_header.company_id.clone();
        let mut repository = fixture.into_repository();

        info!("Scheduling job {} for company {}", job_id, company_id);
        let request = ScheduleJobRequest {
            job_id,
            company_id,
            user_id: user_id.to_string(),
            mode: mode.into(),
            direction: direction.into(),
        };

        let engine = ScheduleJob::new();
        let today = chrono::Local::now().date_naive();

        let response = match engine.execute(&mut repository, &request, today) {
            Ok(result) => {
                if result.operations_scheduled == 0 {
                    warn!("Nothing to schedule: job or operations not found");
                } else if result.conflicts_detected > 0 {
                    warn!("{} operation(s) flagged with conflicts", result.conflicts_detected);
                }
                ScheduleResponse::from(result)
            }
            Err(err) => {
                warn!("Scheduling run failed: {}", err);
                ScheduleResponse::failure(err.to_string())
            }
        };

        let json = serde_json::to_string_pretty(&response).context("Failed to serialize response")?;
        match output_path {
            Some(path) => {
                fs::write(&path, json).context("Failed to write response file")?;
                info!("Wrote response to {:?}", path.as_ref());
            }
            None => println!("{json}"),
        }

        Ok(())
    }
}
