//! Workflow error types for the export lifecycle.
//!
//! All failures the workflow engine can produce are typed here; each maps
//! to a distinct HTTP status and stable error code at the API boundary.

use thiserror::Error;
use uuid::Uuid;

use crate::workflow::types::{ActorRole, ExportStatus};

/// Errors that can occur during workflow operations.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// A status value read from storage is not in the registry.
    ///
    /// This is a data-integrity failure, never a recoverable condition.
    #[error("Status '{0}' is not registered")]
    UnknownStatus(String),

    /// A role string could not be resolved to a known actor role.
    #[error("Role '{0}' is not registered")]
    UnknownRole(String),

    /// Export record not found.
    #[error("Export {0} not found")]
    ExportNotFound(Uuid),

    /// The requested edge is not available to the acting role.
    ///
    /// Expected denial, not a bug: either no such edge exists or the
    /// role is not authorized to traverse it.
    #[error("Transition from {from} to {to} is not available to role {role}")]
    TransitionNotAllowed {
        /// The current status.
        from: ExportStatus,
        /// The requested target status.
        to: ExportStatus,
        /// The acting role.
        role: ActorRole,
    },

    /// Resubmission requested while not in a rejection status.
    #[error("Export in status {status} has nothing to resubmit")]
    ResubmissionNotAvailable {
        /// The current status.
        status: ExportStatus,
    },

    /// A rejection was requested without a reason.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// The client supplied a target status that is not in the vocabulary.
    #[error("'{0}' is not a valid target status")]
    InvalidTargetStatus(String),

    /// A concurrent transition won the version check on this export.
    #[error("Export {0} was modified concurrently")]
    Conflict(Uuid),

    /// The rule set is inconsistent (startup validation or runaway
    /// automatic-transition chain).
    #[error("Workflow configuration error: {0}")]
    Configuration(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),
}

impl WorkflowError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::RejectionReasonRequired | Self::InvalidTargetStatus(_) => 400,

            Self::TransitionNotAllowed { .. } | Self::ResubmissionNotAvailable { .. } => 403,

            Self::ExportNotFound(_) => 404,

            Self::Conflict(_) => 409,

            Self::UnknownStatus(_)
            | Self::UnknownRole(_)
            | Self::Configuration(_)
            | Self::Database(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownStatus(_) => "UNKNOWN_STATUS",
            Self::UnknownRole(_) => "UNKNOWN_ROLE",
            Self::ExportNotFound(_) => "EXPORT_NOT_FOUND",
            Self::TransitionNotAllowed { .. } => "TRANSITION_NOT_ALLOWED",
            Self::ResubmissionNotAvailable { .. } => "RESUBMISSION_NOT_AVAILABLE",
            Self::RejectionReasonRequired => "REJECTION_REASON_REQUIRED",
            Self::InvalidTargetStatus(_) => "INVALID_TARGET_STATUS",
            Self::Conflict(_) => "CONCURRENT_MODIFICATION",
            Self::Configuration(_) => "WORKFLOW_CONFIGURATION_ERROR",
            Self::Database(_) => "DATABASE_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_not_allowed_error() {
        let err = WorkflowError::TransitionNotAllowed {
            from: ExportStatus::Pending,
            to: ExportStatus::FxApproved,
            role: ActorRole::NationalBank,
        };
        assert_eq!(err.status_code(), 403);
        assert_eq!(err.error_code(), "TRANSITION_NOT_ALLOWED");
        assert!(err.to_string().contains("PENDING"));
        assert!(err.to_string().contains("FX_APPROVED"));
        assert!(err.to_string().contains("national-bank"));
    }

    #[test]
    fn test_not_found_error() {
        let err = WorkflowError::ExportNotFound(Uuid::nil());
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.error_code(), "EXPORT_NOT_FOUND");
    }

    #[test]
    fn test_rejection_reason_required_error() {
        let err = WorkflowError::RejectionReasonRequired;
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "REJECTION_REASON_REQUIRED");
    }

    #[test]
    fn test_invalid_target_status_error() {
        let err = WorkflowError::InvalidTargetStatus("WAREHOUSED".to_string());
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TARGET_STATUS");
    }

    #[test]
    fn test_conflict_error() {
        let err = WorkflowError::Conflict(Uuid::nil());
        assert_eq!(err.status_code(), 409);
        assert_eq!(err.error_code(), "CONCURRENT_MODIFICATION");
    }

    #[test]
    fn test_configuration_errors_are_500() {
        assert_eq!(WorkflowError::UnknownStatus(String::new()).status_code(), 500);
        assert_eq!(WorkflowError::UnknownRole(String::new()).status_code(), 500);
        assert_eq!(WorkflowError::Configuration(String::new()).status_code(), 500);
        assert_eq!(WorkflowError::Database(String::new()).status_code(), 500);
    }
}
