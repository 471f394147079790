//! Work center and process entity module
//!
//! A process is a capability (e.g. "milling") that selects eligible work
//! centers; a work center is a physical resource bound to a location,
//! load-balanced across by the Work-Center Selector (§4.7).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Process {
    pub id: String,
    pub name: String,
    pub eligible_work_center_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkCenter {
    pub id: String,
    pub name: String,
    pub location_id: String,
    pub active: bool,
}

impl WorkCenter {
    /// A work center is valid iff it is active and colocated with the job
    /// (§4.7).
    pub fn is_valid_at(&self, location_id: &str) -> bool {
        self.active && self.location_id == location_id
    }
}
