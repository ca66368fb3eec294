//! Property-based tests for the AuthorizationGate.

use proptest::prelude::*;

use crate::workflow::authorization::AuthorizationGate;
use crate::workflow::transitions::TransitionTable;
use crate::workflow::types::{ActorRole, ExportStatus, TransitionKind};

fn arb_status() -> impl Strategy<Value = ExportStatus> {
    prop::sample::select(ExportStatus::ALL.to_vec())
}

fn arb_role() -> impl Strategy<Value = ActorRole> {
    prop::sample::select(ActorRole::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Soundness: every offered action corresponds to a legal rule for
    /// that role, and is never an automatic edge.
    #[test]
    fn prop_actions_are_sound(status in arb_status(), role in arb_role()) {
        for action in AuthorizationGate::actions_for_role(status, role) {
            prop_assert!(TransitionTable::is_legal(status, action.target, role));
            prop_assert_ne!(action.kind, TransitionKind::Automatic);

            let rule = TransitionTable::find_rule(status, action.target)
                .expect("offered action must have a rule");
            prop_assert_eq!(rule.kind, action.kind);
        }
    }

    /// Completeness: every non-automatic rule is offered to its role.
    #[test]
    fn prop_actions_are_complete(status in arb_status()) {
        for rule in TransitionTable::rules_from(status) {
            if rule.kind == TransitionKind::Automatic {
                continue;
            }
            let actions = AuthorizationGate::actions_for_role(status, rule.required_role);
            prop_assert!(
                actions.iter().any(|a| a.target == rule.to),
                "rule {} -> {} not offered to {}",
                rule.from, rule.to, rule.required_role
            );
        }
    }

    /// The system sentinel always yields an empty set.
    #[test]
    fn prop_system_yields_empty(status in arb_status()) {
        prop_assert!(AuthorizationGate::actions_for_role(status, ActorRole::System).is_empty());
    }

    /// Role strings are matched case-insensitively.
    #[test]
    fn prop_role_case_normalized(status in arb_status(), role in arb_role()) {
        let lower = AuthorizationGate::available_actions(status, role.as_str()).unwrap();
        let upper = AuthorizationGate::available_actions(status, &role.as_str().to_uppercase())
            .unwrap();
        prop_assert_eq!(lower, upper);
    }
}
