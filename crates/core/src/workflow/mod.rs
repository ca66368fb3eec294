//! Export lifecycle workflow management for Cofex.
//!
//! This module implements the export lifecycle state machine: the
//! authoritative status registry, the legal-transition table, role
//! authorization, progress calculation, and transition planning.
//!
//! # Modules
//!
//! - `types` - Workflow domain types (ExportStatus, Stage, ActorRole)
//! - `error` - Workflow-specific error types
//! - `registry` - Status registry with stage/terminal/rejection classification
//! - `transitions` - Legal-edge graph and startup validation
//! - `authorization` - Role-based action availability
//! - `progress` - Status-to-percentage calculation
//! - `service` - Transition planning logic

pub mod authorization;
pub mod error;
pub mod progress;
pub mod registry;
pub mod service;
pub mod transitions;
pub mod types;

#[cfg(test)]
mod authorization_props;
#[cfg(test)]
mod progress_props;
#[cfg(test)]
mod service_props;

pub use authorization::AuthorizationGate;
pub use error::WorkflowError;
pub use progress::ProgressCalculator;
pub use registry::{StatusDefinition, StatusRegistry};
pub use service::WorkflowService;
pub use transitions::{TransitionRule, TransitionTable};
pub use types::{Action, ActorRole, ExportStatus, Stage, TransitionKind, WorkflowAction};
