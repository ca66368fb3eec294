//! Repository abstractions for data access.

pub mod export;
pub mod workflow;

pub use export::ExportRepository;
pub use workflow::WorkflowRepository;
