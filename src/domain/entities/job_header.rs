//! Job header entity module
//!
//! The job-level record the Engine reads once per invocation: the anchor
//! dates scheduling propagates from, and the location/priority/deadline
//! fields the other components need (§6).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::DeadlineType;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobHeader {
    pub job_id: String,
    pub company_id: String,
    pub location_id: String,
    pub due_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub job_priority: Option<i32>,
    pub deadline_type: Option<DeadlineType>,
}
