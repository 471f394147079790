pub mod operation;
pub mod make_method;
pub mod dependency_graph;
pub mod scheduled_operation;
pub mod work_center;
pub mod job_header;

pub use operation::{Operation, OperationOrder, OperationStatus, OperationType, RatedTime};
pub use make_method::MakeMethod;
pub use dependency_graph::{CycleDetected, DependencyGraph, DependencyNode, TraversalDirection};
pub use scheduled_operation::{ConflictReason, ScheduledOperation};
pub use work_center::{Process, WorkCenter};
pub use job_header::JobHeader;
