//! Property-based tests for WorkflowService.
//!
//! Randomized validation of the planning rules: a plan succeeds exactly
//! when the authorization gate offers the target, rejections always carry
//! their reason, and terminal statuses admit nothing.

use proptest::prelude::*;
use uuid::Uuid;

use crate::workflow::authorization::AuthorizationGate;
use crate::workflow::error::WorkflowError;
use crate::workflow::service::WorkflowService;
use crate::workflow::transitions::TransitionTable;
use crate::workflow::types::{ActorRole, ExportStatus, TransitionKind};

/// Strategy for generating random ExportStatus values.
fn arb_status() -> impl Strategy<Value = ExportStatus> {
    prop::sample::select(ExportStatus::ALL.to_vec())
}

/// Strategy for generating random human ActorRole values.
fn arb_human_role() -> impl Strategy<Value = ActorRole> {
    prop::sample::select(
        ActorRole::ALL
            .iter()
            .copied()
            .filter(|r| !r.is_system())
            .collect::<Vec<_>>(),
    )
}

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for generating non-empty reason strings.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,100}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// A plan succeeds exactly when the gate offers the target to the role.
    #[test]
    fn prop_plan_agrees_with_gate(
        from in arb_status(),
        to in arb_status(),
        role in arb_human_role(),
        actor_id in arb_uuid(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());

        let offered = AuthorizationGate::actions_for_role(from, role)
            .iter()
            .any(|a| a.target == to);

        let result = WorkflowService::plan(from, to, role.as_str(), actor_id, Some(&reason));

        if offered {
            let action = result.expect("offered action must plan");
            prop_assert_eq!(action.new_status(), to);
            prop_assert_eq!(action.actor_role(), role);
            prop_assert_eq!(action.actor_id(), Some(actor_id));
        } else {
            prop_assert!(matches!(
                result,
                Err(WorkflowError::TransitionNotAllowed { .. })
            ), "expected TransitionNotAllowed");
        }
    }

    /// Rejection edges without a reason always fail; with a reason the
    /// reason is recorded verbatim (trimmed).
    #[test]
    fn prop_rejection_reason_invariant(
        actor_id in arb_uuid(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());

        for rule in TransitionTable::rules() {
            if rule.kind != TransitionKind::Rejection {
                continue;
            }

            let missing = WorkflowService::plan(
                rule.from, rule.to, rule.required_role.as_str(), actor_id, None,
            );
            prop_assert!(matches!(missing, Err(WorkflowError::RejectionReasonRequired)));

            let action = WorkflowService::plan(
                rule.from, rule.to, rule.required_role.as_str(), actor_id, Some(&reason),
            ).expect("rejection with reason must plan");
            prop_assert_eq!(action.kind(), TransitionKind::Rejection);
            prop_assert_eq!(action.event_reason(), Some(reason.as_str()));
        }
    }

    /// Nothing can be planned out of a terminal status.
    #[test]
    fn prop_terminal_admits_nothing(
        to in arb_status(),
        role in arb_human_role(),
        actor_id in arb_uuid(),
    ) {
        for terminal in [ExportStatus::Completed, ExportStatus::Cancelled] {
            let result = WorkflowService::plan(terminal, to, role.as_str(), actor_id, Some("x"));
            prop_assert!(matches!(
                result,
                Err(WorkflowError::TransitionNotAllowed { .. })
            ), "expected TransitionNotAllowed");
        }
    }

    /// The system sentinel can never plan a transition directly.
    #[test]
    fn prop_system_role_plans_nothing(
        from in arb_status(),
        to in arb_status(),
        actor_id in arb_uuid(),
    ) {
        let result = WorkflowService::plan(from, to, "system", actor_id, Some("x"));
        prop_assert!(matches!(
            result,
            Err(WorkflowError::TransitionNotAllowed { .. })
        ), "expected TransitionNotAllowed");
    }

    /// Resubmission from a rejection status reaches the pending status of
    /// the stage the export was rejected from, so a resubmitted export
    /// resumes in that stage, never behind it.
    #[test]
    fn prop_resubmission_round_trip(actor_id in arb_uuid()) {
        use crate::workflow::registry::StatusRegistry;

        for def in StatusRegistry::all_definitions().filter(|d| d.is_rejection) {
            let target = WorkflowService::resubmission_target(def.status)
                .expect("rejection status must resubmit");
            let target_def = StatusRegistry::definition(target);
            prop_assert_eq!(target_def.stage, def.stage);

            let action = WorkflowService::plan(
                def.status, target, "exporter", actor_id, None,
            ).expect("exporter must be able to resubmit");
            prop_assert_eq!(action.kind(), TransitionKind::Resubmission);
        }
    }
}
