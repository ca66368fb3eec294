//! Authorization gate: which actions may a role perform right now.
//!
//! A role mismatch is not an error, it simply yields an empty action set;
//! the API layer turns "no actions" on a command path into a 403. The
//! gate only fails for configuration-integrity problems (unknown role).

use crate::workflow::error::WorkflowError;
use crate::workflow::transitions::TransitionTable;
use crate::workflow::types::{Action, ActorRole, ExportStatus, TransitionKind};

/// Stateless engine computing role-scoped action availability.
pub struct AuthorizationGate;

impl AuthorizationGate {
    /// Actions available to a raw role string in the given status.
    ///
    /// Role matching is case-normalized via [`ActorRole::parse`].
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownRole` if the role string is not
    /// registered. Authorization failure itself is never an error.
    pub fn available_actions(
        status: ExportStatus,
        role: &str,
    ) -> Result<Vec<Action>, WorkflowError> {
        let role =
            ActorRole::parse(role).ok_or_else(|| WorkflowError::UnknownRole(role.to_string()))?;
        Ok(Self::actions_for_role(status, role))
    }

    /// Actions available to an already-parsed role in the given status.
    ///
    /// The `system` sentinel is reserved for engine-triggered automatic
    /// transitions and never matches as a human actor.
    #[must_use]
    pub fn actions_for_role(status: ExportStatus, role: ActorRole) -> Vec<Action> {
        if role.is_system() {
            return Vec::new();
        }

        TransitionTable::rules_from(status)
            .iter()
            .filter(|r| r.kind != TransitionKind::Automatic && r.required_role == role)
            .map(|r| Action {
                target: r.to,
                kind: r.kind,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_national_bank_at_fx_pending() {
        let actions =
            AuthorizationGate::actions_for_role(ExportStatus::FxApplicationPending, ActorRole::NationalBank);
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action {
            target: ExportStatus::FxApproved,
            kind: TransitionKind::Approval
        }));
        assert!(actions.contains(&Action {
            target: ExportStatus::FxRejected,
            kind: TransitionKind::Rejection
        }));
    }

    #[test]
    fn test_role_mismatch_yields_empty_set() {
        // National bank has no authority before the FX stage.
        let actions =
            AuthorizationGate::actions_for_role(ExportStatus::Pending, ActorRole::NationalBank);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_terminal_status_yields_empty_set() {
        for role in ActorRole::ALL {
            assert!(AuthorizationGate::actions_for_role(ExportStatus::Completed, *role).is_empty());
            assert!(AuthorizationGate::actions_for_role(ExportStatus::Cancelled, *role).is_empty());
        }
    }

    #[test]
    fn test_system_sentinel_never_matches() {
        // FX_APPROVED has only an automatic edge; it is not offered as an action.
        let actions =
            AuthorizationGate::actions_for_role(ExportStatus::FxApproved, ActorRole::System);
        assert!(actions.is_empty());
    }

    #[test]
    fn test_automatic_edges_hidden_from_humans() {
        for role in ActorRole::ALL {
            let actions = AuthorizationGate::actions_for_role(ExportStatus::Delivered, *role);
            assert!(actions.is_empty(), "{role} should see no action at DELIVERED");
        }
    }

    #[test]
    fn test_available_actions_parses_role() {
        let actions =
            AuthorizationGate::available_actions(ExportStatus::FxApplicationPending, "National-Bank")
                .unwrap();
        assert_eq!(actions.len(), 2);

        // Legacy short name.
        let actions =
            AuthorizationGate::available_actions(ExportStatus::BankDocumentPending, "bank").unwrap();
        assert_eq!(actions.len(), 2);

        let err = AuthorizationGate::available_actions(ExportStatus::Pending, "auditor").unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownRole(_)));
    }

    #[test]
    fn test_exporter_at_rejection_status() {
        let actions =
            AuthorizationGate::actions_for_role(ExportStatus::FxRejected, ActorRole::Exporter);
        assert_eq!(actions.len(), 2);
        assert!(actions.contains(&Action {
            target: ExportStatus::FxApplicationPending,
            kind: TransitionKind::Resubmission
        }));
        assert!(actions.contains(&Action {
            target: ExportStatus::Cancelled,
            kind: TransitionKind::Approval
        }));
    }
}
