pub mod schedule_job;

pub use schedule_job::{ScheduleJob, ScheduleJobRequest, ScheduleJobResult, ScheduleMode};
