//! Property-based tests for the ProgressCalculator.

use proptest::prelude::*;

use crate::workflow::progress::ProgressCalculator;
use crate::workflow::registry::StatusRegistry;
use crate::workflow::transitions::TransitionTable;
use crate::workflow::types::{ExportStatus, TransitionKind};

fn arb_status() -> impl Strategy<Value = ExportStatus> {
    prop::sample::select(ExportStatus::ALL.to_vec())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Progress is always within [0, 100] and deterministic.
    #[test]
    fn prop_progress_bounded_and_deterministic(status in arb_status()) {
        let p = ProgressCalculator::progress_of(status);
        prop_assert!(p <= 100);
        prop_assert_eq!(p, ProgressCalculator::progress_of(status));
    }

    /// Progress never decreases along a non-rejection edge, except into
    /// the CANCELLED sink, which always reports zero.
    #[test]
    fn prop_progress_monotone_along_forward_edges(_seed in any::<u8>()) {
        for rule in TransitionTable::rules() {
            if rule.kind == TransitionKind::Rejection || rule.to == ExportStatus::Cancelled {
                continue;
            }
            prop_assert!(
                ProgressCalculator::progress_of(rule.from)
                    <= ProgressCalculator::progress_of(rule.to),
                "progress drops along {} -> {}",
                rule.from,
                rule.to
            );
        }
    }

    /// A rejection reports the progress of the status it was rejected
    /// from, not zero.
    #[test]
    fn prop_rejection_progress_matches_stage(_seed in any::<u8>()) {
        for def in StatusRegistry::all_definitions().filter(|d| d.is_rejection) {
            let pending = StatusRegistry::pending_status_of(def.stage)
                .expect("rejection stage has a pending status");
            prop_assert_eq!(
                ProgressCalculator::progress_of(def.status),
                ProgressCalculator::progress_of(pending)
            );
            prop_assert!(ProgressCalculator::progress_of(def.status) > 0);
        }
    }
}
