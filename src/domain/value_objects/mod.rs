pub mod rate_unit;
pub mod deadline_type;

pub use rate_unit::RateUnit;
pub use deadline_type::DeadlineType;
