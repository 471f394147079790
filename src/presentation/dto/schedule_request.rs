//! Schedule request DTO
//!
//! The literal wire shape of the request port payload (§6): field names and
//! optionality match spec exactly, with `mode`/`direction` defaulting when
//! absent.

use serde::{Deserialize, Serialize};

use crate::application::services::SchedulingDirection;
use crate::application::use_cases::ScheduleMode;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestMode {
    #[default]
    Initial,
    Reschedule,
}

impl From<RequestMode> for ScheduleMode {
    fn from(mode: RequestMode) -> Self {
        match mode {
            RequestMode::Initial => ScheduleMode::Initial,
            RequestMode::Reschedule => ScheduleMode::Reschedule,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    #[default]
    Backward,
    Forward,
}

impl From<RequestDirection> for SchedulingDirection {
    fn from(direction: RequestDirection) -> Self {
        match direction {
            RequestDirection::Backward => SchedulingDirection::Backward,
            RequestDirection::Forward => SchedulingDirection::Forward,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    pub job_id: String,
    pub company_id: String,
    pub user_id: String,
    #[serde(default)]
    pub mode: RequestMode,
    #[serde(default)]
    pub direction: RequestDirection,
}
