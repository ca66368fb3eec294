//! Transition table: the legal-edge graph of the export lifecycle.
//!
//! Holds every legal `(from, to)` edge with the role authorized to
//! traverse it and the edge's kind. The table is fixed at compile time;
//! [`TransitionTable::validate`] runs at process start and the server
//! refuses to boot on an inconsistent rule set.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::workflow::error::WorkflowError;
use crate::workflow::registry::StatusRegistry;
use crate::workflow::types::{ActorRole, ExportStatus, TransitionKind};

/// A single legal edge in the lifecycle graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    /// Status the edge leaves from.
    pub from: ExportStatus,
    /// Status the edge arrives at.
    pub to: ExportStatus,
    /// Role authorized to traverse the edge (`System` for automatic).
    pub required_role: ActorRole,
    /// Classification of the edge.
    pub kind: TransitionKind,
}

const fn rule(
    from: ExportStatus,
    to: ExportStatus,
    required_role: ActorRole,
    kind: TransitionKind,
) -> TransitionRule {
    TransitionRule {
        from,
        to,
        required_role,
        kind,
    }
}

/// The full rule set, grouped by stage.
const RULES: &[TransitionRule] = &{
    use ActorRole as R;
    use ExportStatus as S;
    use TransitionKind as K;

    [
        // Creation
        rule(S::Draft, S::EcxPending, R::Exporter, K::Approval),
        rule(S::Pending, S::EcxPending, R::Exporter, K::Approval),
        // ECX verification
        rule(S::EcxPending, S::EcxVerified, R::Ecx, K::Approval),
        rule(S::EcxPending, S::EcxRejected, R::Ecx, K::Rejection),
        rule(S::EcxRejected, S::EcxPending, R::Exporter, K::Resubmission),
        rule(S::EcxVerified, S::EctaLicensePending, R::Exporter, K::Approval),
        // ECTA license
        rule(S::EctaLicensePending, S::EctaLicenseApproved, R::Ecta, K::Approval),
        rule(S::EctaLicensePending, S::EctaLicenseRejected, R::Ecta, K::Rejection),
        rule(S::EctaLicenseRejected, S::EctaLicensePending, R::Exporter, K::Resubmission),
        rule(S::EctaLicenseApproved, S::EctaQualityPending, R::System, K::Automatic),
        // ECTA quality
        rule(S::EctaQualityPending, S::EctaQualityApproved, R::Ecta, K::Approval),
        rule(S::EctaQualityPending, S::EctaQualityRejected, R::Ecta, K::Rejection),
        rule(S::EctaQualityRejected, S::EctaQualityPending, R::Exporter, K::Resubmission),
        rule(S::EctaQualityApproved, S::EctaOriginPending, R::System, K::Automatic),
        // ECTA origin
        rule(S::EctaOriginPending, S::EctaOriginApproved, R::Ecta, K::Approval),
        rule(S::EctaOriginPending, S::EctaOriginRejected, R::Ecta, K::Rejection),
        rule(S::EctaOriginRejected, S::EctaOriginPending, R::Exporter, K::Resubmission),
        rule(S::EctaOriginApproved, S::EctaContractPending, R::System, K::Automatic),
        // ECTA contract
        rule(S::EctaContractPending, S::EctaContractApproved, R::Ecta, K::Approval),
        rule(S::EctaContractPending, S::EctaContractRejected, R::Ecta, K::Rejection),
        rule(S::EctaContractRejected, S::EctaContractPending, R::Exporter, K::Resubmission),
        rule(S::EctaContractApproved, S::BankDocumentPending, R::Exporter, K::Approval),
        // Banking
        rule(S::BankDocumentPending, S::BankDocumentVerified, R::CommercialBank, K::Approval),
        rule(S::BankDocumentPending, S::BankDocumentRejected, R::CommercialBank, K::Rejection),
        rule(S::BankDocumentRejected, S::BankDocumentPending, R::Exporter, K::Resubmission),
        rule(S::BankDocumentVerified, S::FxApplicationPending, R::CommercialBank, K::Approval),
        // FX approval
        rule(S::FxApplicationPending, S::FxApproved, R::NationalBank, K::Approval),
        rule(S::FxApplicationPending, S::FxRejected, R::NationalBank, K::Rejection),
        rule(S::FxRejected, S::FxApplicationPending, R::Exporter, K::Resubmission),
        rule(S::FxApproved, S::CustomsPending, R::System, K::Automatic),
        // Export customs
        rule(S::CustomsPending, S::CustomsCleared, R::Customs, K::Approval),
        rule(S::CustomsPending, S::CustomsRejected, R::Customs, K::Rejection),
        rule(S::CustomsRejected, S::CustomsPending, R::Exporter, K::Resubmission),
        rule(S::CustomsCleared, S::ShipmentPending, R::System, K::Automatic),
        // Shipping
        rule(S::ShipmentPending, S::ShipmentScheduled, R::Shipper, K::Approval),
        rule(S::ShipmentScheduled, S::Shipped, R::Shipper, K::Approval),
        rule(S::Shipped, S::Arrived, R::Shipper, K::Approval),
        rule(S::Arrived, S::ImportCustomsPending, R::Shipper, K::Approval),
        // Import customs
        rule(S::ImportCustomsPending, S::ImportCustomsCleared, R::Customs, K::Approval),
        rule(S::ImportCustomsPending, S::ImportCustomsRejected, R::Customs, K::Rejection),
        rule(S::ImportCustomsRejected, S::ImportCustomsPending, R::Exporter, K::Resubmission),
        rule(S::ImportCustomsCleared, S::Delivered, R::System, K::Automatic),
        // Closing
        rule(S::Delivered, S::PaymentPending, R::System, K::Automatic),
        rule(S::PaymentPending, S::PaymentReceived, R::CommercialBank, K::Approval),
        rule(S::PaymentReceived, S::FxRepatriated, R::NationalBank, K::Approval),
        rule(S::FxRepatriated, S::Completed, R::System, K::Automatic),
        // Cancellation (exporter abandons before submission or after a rejection)
        rule(S::Draft, S::Cancelled, R::Exporter, K::Approval),
        rule(S::Pending, S::Cancelled, R::Exporter, K::Approval),
        rule(S::EcxRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::EctaLicenseRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::EctaQualityRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::EctaOriginRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::EctaContractRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::BankDocumentRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::FxRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::CustomsRejected, S::Cancelled, R::Exporter, K::Approval),
        rule(S::ImportCustomsRejected, S::Cancelled, R::Exporter, K::Approval),
    ]
};

/// Outgoing rules indexed by `from` status.
static RULES_BY_FROM: Lazy<HashMap<ExportStatus, Vec<&'static TransitionRule>>> =
    Lazy::new(|| {
        let mut map: HashMap<ExportStatus, Vec<&'static TransitionRule>> = HashMap::new();
        for r in RULES {
            map.entry(r.from).or_default().push(r);
        }
        map
    });

/// Stateless view over the fixed rule set.
pub struct TransitionTable;

impl TransitionTable {
    /// The complete rule set.
    #[must_use]
    pub fn rules() -> &'static [TransitionRule] {
        RULES
    }

    /// All rules leaving `from`, regardless of role.
    #[must_use]
    pub fn rules_from(from: ExportStatus) -> &'static [&'static TransitionRule] {
        RULES_BY_FROM.get(&from).map_or(&[], |v| v.as_slice())
    }

    /// The rule for `(from, to)`, if one exists.
    #[must_use]
    pub fn find_rule(from: ExportStatus, to: ExportStatus) -> Option<&'static TransitionRule> {
        Self::rules_from(from).iter().copied().find(|r| r.to == to)
    }

    /// Returns true if `role` may move an export from `from` to `to`.
    #[must_use]
    pub fn is_legal(from: ExportStatus, to: ExportStatus, role: ActorRole) -> bool {
        Self::find_rule(from, to).is_some_and(|r| r.required_role == role)
    }

    /// The resubmission edge leaving a rejection status, if any.
    #[must_use]
    pub fn resubmission_from(status: ExportStatus) -> Option<&'static TransitionRule> {
        Self::rules_from(status)
            .iter()
            .copied()
            .find(|r| r.kind == TransitionKind::Resubmission)
    }

    /// The automatic edge leaving a pass-through status, if any.
    #[must_use]
    pub fn automatic_from(status: ExportStatus) -> Option<&'static TransitionRule> {
        Self::rules_from(status)
            .iter()
            .copied()
            .find(|r| r.kind == TransitionKind::Automatic)
    }

    /// Validates the rule set against the status registry.
    ///
    /// Run once at process start; a failure is fatal. Checks:
    ///
    /// - no `(from, to)` pair appears twice
    /// - every edge endpoint resolves in the registry
    /// - terminal statuses have no outgoing edges
    /// - every rejection status has exactly one resubmission edge,
    ///   targeting a non-terminal status in the same stage
    /// - resubmission edges originate only at rejection statuses
    /// - rejection-kind edges land exactly on rejection statuses,
    ///   within the same stage
    /// - the `system` role appears on exactly the automatic edges,
    ///   and at most one automatic edge leaves any status
    /// - the graph restricted to non-rejection edges is acyclic
    ///   (forward progress is strictly ordered)
    pub fn validate() -> Result<(), WorkflowError> {
        let mut seen = std::collections::HashSet::new();
        for r in RULES {
            if !seen.insert((r.from, r.to)) {
                return Err(WorkflowError::Configuration(format!(
                    "duplicate edge {} -> {}",
                    r.from, r.to
                )));
            }
        }

        for r in RULES {
            // Round-trips each endpoint through the string path the
            // persistence layer uses.
            StatusRegistry::lookup(r.from.as_str())?;
            StatusRegistry::lookup(r.to.as_str())?;

            let from_def = StatusRegistry::definition(r.from);
            let to_def = StatusRegistry::definition(r.to);

            if from_def.is_terminal {
                return Err(WorkflowError::Configuration(format!(
                    "terminal status {} has an outgoing edge to {}",
                    r.from, r.to
                )));
            }

            if (r.kind == TransitionKind::Automatic) != (r.required_role == ActorRole::System) {
                return Err(WorkflowError::Configuration(format!(
                    "edge {} -> {} mixes kind {} with role {}",
                    r.from, r.to, r.kind, r.required_role
                )));
            }

            if (r.kind == TransitionKind::Rejection) != to_def.is_rejection {
                return Err(WorkflowError::Configuration(format!(
                    "edge {} -> {} of kind {} is inconsistent with the target's rejection flag",
                    r.from, r.to, r.kind
                )));
            }

            if r.kind == TransitionKind::Rejection && from_def.stage != to_def.stage {
                return Err(WorkflowError::Configuration(format!(
                    "rejection edge {} -> {} crosses stages",
                    r.from, r.to
                )));
            }

            if r.kind == TransitionKind::Resubmission && !from_def.is_rejection {
                return Err(WorkflowError::Configuration(format!(
                    "resubmission edge leaves non-rejection status {}",
                    r.from
                )));
            }
        }

        for def in StatusRegistry::all_definitions() {
            if def.is_rejection {
                let resubmissions: Vec<_> = Self::rules_from(def.status)
                    .iter()
                    .filter(|r| r.kind == TransitionKind::Resubmission)
                    .collect();
                if resubmissions.len() != 1 {
                    return Err(WorkflowError::Configuration(format!(
                        "rejection status {} has {} resubmission edges, expected exactly one",
                        def.status,
                        resubmissions.len()
                    )));
                }
                let target = StatusRegistry::definition(resubmissions[0].to);
                if target.is_terminal {
                    return Err(WorkflowError::Configuration(format!(
                        "resubmission from {} targets terminal status {}",
                        def.status, target.status
                    )));
                }
                if target.stage != def.stage {
                    return Err(WorkflowError::Configuration(format!(
                        "resubmission from {} leaves its stage",
                        def.status
                    )));
                }
            }

            let automatics = Self::rules_from(def.status)
                .iter()
                .filter(|r| r.kind == TransitionKind::Automatic)
                .count();
            if automatics > 1 {
                return Err(WorkflowError::Configuration(format!(
                    "status {} has {automatics} automatic edges, expected at most one",
                    def.status
                )));
            }
        }

        Self::check_forward_acyclic()
    }

    /// Cycle detection over the graph restricted to non-rejection edges.
    fn check_forward_acyclic() -> Result<(), WorkflowError> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unvisited,
            InProgress,
            Done,
        }

        fn visit(
            status: ExportStatus,
            marks: &mut HashMap<ExportStatus, Mark>,
        ) -> Result<(), WorkflowError> {
            match marks.get(&status).copied().unwrap_or(Mark::Unvisited) {
                Mark::Done => return Ok(()),
                Mark::InProgress => {
                    return Err(WorkflowError::Configuration(format!(
                        "forward cycle through {status}"
                    )));
                }
                Mark::Unvisited => {}
            }
            marks.insert(status, Mark::InProgress);
            for r in TransitionTable::rules_from(status) {
                if r.kind != TransitionKind::Rejection {
                    visit(r.to, marks)?;
                }
            }
            marks.insert(status, Mark::Done);
            Ok(())
        }

        let mut marks = HashMap::new();
        for status in ExportStatus::ALL {
            visit(*status, &mut marks)?;
        }
        Ok(())
    }
}
