//! Deadline type value object module
//!
//! Fixed ranking used as the third sort key when the Priority Assigner
//! orders operations within a work center (§4.8 of the design).

use serde::{Deserialize, Serialize};

/// Job-level deadline classification, used only to break ties after
/// `startDate` and `jobPriority` when ranking operations within a work
/// center. Lower rank sorts first.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeadlineType {
    Asap,
    HardDeadline,
    SoftDeadline,
    NoDeadline,
}

impl DeadlineType {
    /// Missing deadline type defaults to the loosest (last-sorting) kind.
    pub fn or_default(value: Option<DeadlineType>) -> DeadlineType {
        value.unwrap_or(DeadlineType::NoDeadline)
    }
}

impl Default for DeadlineType {
    fn default() -> Self {
        DeadlineType::NoDeadline
    }
}
