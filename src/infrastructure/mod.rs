//! Infrastructure layer - Implementations of application seams

pub mod memory;

pub use memory::InMemoryQueueService;
