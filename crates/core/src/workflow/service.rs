//! Workflow planning service for export state transitions.
//!
//! Pure validation and planning: given the current status and a requested
//! transition, produce the audit-carrying [`WorkflowAction`] to persist,
//! or a typed error. The persistence engine applies the plan atomically.

use chrono::Utc;
use uuid::Uuid;

use crate::workflow::authorization::AuthorizationGate;
use crate::workflow::error::WorkflowError;
use crate::workflow::registry::StatusRegistry;
use crate::workflow::transitions::TransitionTable;
use crate::workflow::types::{ActorRole, ExportStatus, TransitionKind, WorkflowAction};

/// Upper bound on consecutive automatic hops.
///
/// The longest legitimate chain is two (`IMPORT_CUSTOMS_CLEARED` ->
/// `DELIVERED` -> `PAYMENT_PENDING`); anything past the bound indicates
/// a configuration cycle.
pub const MAX_AUTOMATIC_HOPS: u32 = 8;

/// Stateless service planning export workflow transitions.
pub struct WorkflowService;

impl WorkflowService {
    /// Plans a transition requested by an actor.
    ///
    /// # Arguments
    /// * `current` - The export's current status
    /// * `target` - The requested target status
    /// * `role` - The acting role, as carried by the session
    /// * `actor_id` - The acting user
    /// * `reason` - Rejection reason or approval note
    ///
    /// # Errors
    ///
    /// * `WorkflowError::UnknownRole` if the role string is not registered
    /// * `WorkflowError::TransitionNotAllowed` if no edge to `target` is
    ///   available to the role from `current`
    /// * `WorkflowError::RejectionReasonRequired` for a rejection edge
    ///   without a non-empty reason
    pub fn plan(
        current: ExportStatus,
        target: ExportStatus,
        role: &str,
        actor_id: Uuid,
        reason: Option<&str>,
    ) -> Result<WorkflowAction, WorkflowError> {
        let actor_role =
            ActorRole::parse(role).ok_or_else(|| WorkflowError::UnknownRole(role.to_string()))?;

        let available = AuthorizationGate::actions_for_role(current, actor_role);
        let action = available.iter().find(|a| a.target == target).ok_or(
            WorkflowError::TransitionNotAllowed {
                from: current,
                to: target,
                role: actor_role,
            },
        )?;

        let reason = reason.map(str::trim).filter(|r| !r.is_empty());

        match action.kind {
            TransitionKind::Rejection => {
                let reason = reason.ok_or(WorkflowError::RejectionReasonRequired)?;
                Ok(WorkflowAction::Rejection {
                    new_status: target,
                    actor_role,
                    actor_id,
                    occurred_at: Utc::now(),
                    reason: reason.to_string(),
                })
            }
            TransitionKind::Approval => Ok(WorkflowAction::Approval {
                new_status: target,
                actor_role,
                actor_id,
                occurred_at: Utc::now(),
                notes: reason.map(ToString::to_string),
            }),
            TransitionKind::Resubmission => Ok(WorkflowAction::Resubmission {
                new_status: target,
                actor_role,
                actor_id,
                occurred_at: Utc::now(),
            }),
            // Automatic edges are never offered to human actors.
            TransitionKind::Automatic => Err(WorkflowError::TransitionNotAllowed {
                from: current,
                to: target,
                role: actor_role,
            }),
        }
    }

    /// Plans the automatic hop leaving `current`, if one is configured.
    ///
    /// The engine follows these after a successful transition, under the
    /// `system` sentinel, bounded by [`MAX_AUTOMATIC_HOPS`].
    #[must_use]
    pub fn plan_automatic(current: ExportStatus) -> Option<WorkflowAction> {
        TransitionTable::automatic_from(current).map(|r| WorkflowAction::Automatic {
            new_status: r.to,
            occurred_at: Utc::now(),
        })
    }

    /// The configured resubmission target for an export in a rejection
    /// status.
    ///
    /// # Errors
    ///
    /// * `WorkflowError::ResubmissionNotAvailable` if `current` is not a
    ///   rejection status
    /// * `WorkflowError::Configuration` if the rejection status has no
    ///   resubmission edge (caught by startup validation)
    pub fn resubmission_target(current: ExportStatus) -> Result<ExportStatus, WorkflowError> {
        if !StatusRegistry::definition(current).is_rejection {
            return Err(WorkflowError::ResubmissionNotAvailable { status: current });
        }
        TransitionTable::resubmission_from(current)
            .map(|r| r.to)
            .ok_or_else(|| {
                WorkflowError::Configuration(format!("no resubmission edge from {current}"))
            })
    }

    /// Validates the status registry and transition table.
    ///
    /// Called once at process start; the server must not accept commands
    /// if this fails.
    pub fn validate_configuration() -> Result<(), WorkflowError> {
        TransitionTable::validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_approval() {
        let actor = Uuid::new_v4();
        let action = WorkflowService::plan(
            ExportStatus::FxApplicationPending,
            ExportStatus::FxApproved,
            "national-bank",
            actor,
            None,
        )
        .unwrap();
        assert_eq!(action.new_status(), ExportStatus::FxApproved);
        assert_eq!(action.kind(), TransitionKind::Approval);
        assert_eq!(action.actor_id(), Some(actor));
    }

    #[test]
    fn test_plan_forbidden_for_wrong_role() {
        // Scenario: no FX authority while the export is still in PENDING.
        let result = WorkflowService::plan(
            ExportStatus::Pending,
            ExportStatus::FxApproved,
            "national-bank",
            Uuid::new_v4(),
            None,
        );
        assert!(matches!(
            result,
            Err(WorkflowError::TransitionNotAllowed { .. })
        ));
    }

    #[test]
    fn test_plan_rejection_requires_reason() {
        let result = WorkflowService::plan(
            ExportStatus::FxApplicationPending,
            ExportStatus::FxRejected,
            "national-bank",
            Uuid::new_v4(),
            None,
        );
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));

        let result = WorkflowService::plan(
            ExportStatus::FxApplicationPending,
            ExportStatus::FxRejected,
            "national-bank",
            Uuid::new_v4(),
            Some("   "),
        );
        assert!(matches!(result, Err(WorkflowError::RejectionReasonRequired)));
    }

    #[test]
    fn test_plan_rejection_records_reason() {
        let action = WorkflowService::plan(
            ExportStatus::FxApplicationPending,
            ExportStatus::FxRejected,
            "national-bank",
            Uuid::new_v4(),
            Some("insufficient documentation"),
        )
        .unwrap();
        assert_eq!(action.kind(), TransitionKind::Rejection);
        assert_eq!(action.event_reason(), Some("insufficient documentation"));
    }

    #[test]
    fn test_plan_unknown_role() {
        let result = WorkflowService::plan(
            ExportStatus::Pending,
            ExportStatus::EcxPending,
            "warehouse",
            Uuid::new_v4(),
            None,
        );
        assert!(matches!(result, Err(WorkflowError::UnknownRole(_))));
    }

    #[test]
    fn test_plan_from_terminal_is_forbidden() {
        for target in ExportStatus::ALL {
            let result = WorkflowService::plan(
                ExportStatus::Completed,
                *target,
                "exporter",
                Uuid::new_v4(),
                None,
            );
            assert!(matches!(
                result,
                Err(WorkflowError::TransitionNotAllowed { .. })
            ));
        }
    }

    #[test]
    fn test_plan_automatic_chain_is_bounded() {
        // Follow automatic hops from every status; the chain must dry up
        // well before the configured bound.
        for status in ExportStatus::ALL {
            let mut current = *status;
            let mut hops = 0;
            while let Some(action) = WorkflowService::plan_automatic(current) {
                current = action.new_status();
                hops += 1;
                assert!(hops <= MAX_AUTOMATIC_HOPS, "runaway chain from {status}");
            }
        }
    }

    #[test]
    fn test_delivered_chain() {
        let action = WorkflowService::plan_automatic(ExportStatus::ImportCustomsCleared).unwrap();
        assert_eq!(action.new_status(), ExportStatus::Delivered);
        let action = WorkflowService::plan_automatic(ExportStatus::Delivered).unwrap();
        assert_eq!(action.new_status(), ExportStatus::PaymentPending);
        assert!(WorkflowService::plan_automatic(ExportStatus::PaymentPending).is_none());
    }

    #[test]
    fn test_resubmission_target() {
        assert_eq!(
            WorkflowService::resubmission_target(ExportStatus::FxRejected).unwrap(),
            ExportStatus::FxApplicationPending
        );
        assert!(matches!(
            WorkflowService::resubmission_target(ExportStatus::Pending),
            Err(WorkflowError::ResubmissionNotAvailable { .. })
        ));
    }

    #[test]
    fn test_validate_configuration() {
        WorkflowService::validate_configuration().unwrap();
    }
}
