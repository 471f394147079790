pub mod in_memory_scheduling_repository;

pub use in_memory_scheduling_repository::InMemorySchedulingRepository;
