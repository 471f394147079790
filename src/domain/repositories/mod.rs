pub mod scheduling_repository;

pub use scheduling_repository::{OperationUpdate, SchedulingRepository};
