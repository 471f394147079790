//! Schedule response DTO
//!
//! The literal wire shape of the request port response (§6): a success
//! payload with scheduling counts, or `{success: false, message}` on
//! failure — no shared tag field, matching spec exactly.

use serde::{Deserialize, Serialize};

use crate::application::use_cases::ScheduleJobResult;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[serde(untagged)]
pub enum ScheduleResponse {
    Success {
        operations_scheduled: usize,
        conflicts_detected: usize,
        work_centers_affected: Vec<String>,
        assembly_depth: u32,
    },
    Failure {
        success: bool,
        message: String,
    },
}

impl ScheduleResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure { success: false, message: message.into() }
    }
}

impl From<ScheduleJobResult> for ScheduleResponse {
    fn from(result: ScheduleJobResult) -> Self {
        Self::Success {
            operations_scheduled: result.operations_scheduled,
            conflicts_detected: result.conflicts_detected,
            work_centers_affected: result.work_centers_affected,
            assembly_depth: result.assembly_depth,
        }
    }
}
