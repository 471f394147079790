//! Engine error module
//!
//! The behavioral error categories from the design's error handling policy:
//! everything except a scheduling conflict (which is data carried on a
//! `ScheduledOperation`, not an error) aborts the invocation before the
//! write phase.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no eligible work center for process {process_id}: {reason}")]
    NoEligibleWorkCenter { process_id: String, reason: String },

    #[error("dependency cycle detected among operations: {0:?}")]
    CycleDetected(Vec<String>),

    #[error("storage error: {0}")]
    StorageError(#[from] anyhow::Error),
}

/// A job with no root make method or no schedulable operations is not an
/// error — the engine returns a zero-count success response for it. This
/// type documents that outcome at the type level for callers that want to
/// distinguish it from a populated schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NothingToSchedule;
