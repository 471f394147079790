pub mod schedule_request;
pub mod schedule_response;
pub mod scenario_fixture;

pub use schedule_request::{RequestDirection, RequestMode, ScheduleRequest};
pub use schedule_response::ScheduleResponse;
pub use scenario_fixture::ScenarioFixture;
