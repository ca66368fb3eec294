//! Status registry: the single authoritative status table.
//!
//! Every status carries its stage, rejection/terminal classification,
//! display metadata, and a progress weight. The table is fixed at compile
//! time and not editable at runtime; dashboards read display metadata from
//! here instead of keeping their own copies.

use crate::workflow::error::WorkflowError;
use crate::workflow::types::{ExportStatus, Stage};

/// Static configuration of a single status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDefinition {
    /// The status value.
    pub status: ExportStatus,
    /// Pipeline stage the status belongs to.
    pub stage: Stage,
    /// Short display label.
    pub label: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Reachable only via a rejection-kind transition.
    pub is_rejection: bool,
    /// No outgoing transitions.
    pub is_terminal: bool,
    /// Cumulative rank along the forward path; rejection statuses carry
    /// the weight of their stage's pending status, `CANCELLED` carries 0.
    pub progress_weight: u32,
}

/// Stateless registry over the fixed status table.
pub struct StatusRegistry;

impl StatusRegistry {
    /// Returns the definition of a status. Total over the closed enum.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub fn definition(status: ExportStatus) -> StatusDefinition {
        use ExportStatus as S;
        use Stage as St;

        let (stage, label, description, is_rejection, is_terminal, progress_weight) = match status
        {
            S::Draft => (St::Creation, "Draft", "Export request created", false, false, 1),
            S::Pending => (St::Creation, "Pending", "Awaiting submission", false, false, 2),
            S::EcxPending => (
                St::EcxVerification,
                "ECX Pending",
                "Awaiting ECX lot verification",
                false,
                false,
                3,
            ),
            S::EcxVerified => {
                (St::EcxVerification, "ECX Verified", "Lot verified by ECX", false, false, 4)
            }
            S::EcxRejected => {
                (St::EcxVerification, "ECX Rejected", "Lot rejected by ECX", true, false, 3)
            }
            S::EctaLicensePending => (
                St::EctaLicense,
                "License Pending",
                "Awaiting ECTA license approval",
                false,
                false,
                5,
            ),
            S::EctaLicenseApproved => (
                St::EctaLicense,
                "License Approved",
                "Export license approved",
                false,
                false,
                6,
            ),
            S::EctaLicenseRejected => (
                St::EctaLicense,
                "License Rejected",
                "Export license rejected",
                true,
                false,
                5,
            ),
            S::EctaQualityPending => (
                St::EctaQuality,
                "Quality Pending",
                "Awaiting ECTA quality certification",
                false,
                false,
                7,
            ),
            S::EctaQualityApproved => (
                St::EctaQuality,
                "Quality Approved",
                "Quality certified by ECTA",
                false,
                false,
                8,
            ),
            S::EctaQualityRejected => (
                St::EctaQuality,
                "Quality Rejected",
                "Quality certification rejected",
                true,
                false,
                7,
            ),
            S::EctaOriginPending => (
                St::EctaOrigin,
                "Origin Pending",
                "Awaiting origin verification",
                false,
                false,
                9,
            ),
            S::EctaOriginApproved => {
                (St::EctaOrigin, "Origin Approved", "Origin verified", false, false, 10)
            }
            S::EctaOriginRejected => (
                St::EctaOrigin,
                "Origin Rejected",
                "Origin verification rejected",
                true,
                false,
                9,
            ),
            S::EctaContractPending => (
                St::EctaContract,
                "Contract Pending",
                "Awaiting sales contract approval",
                false,
                false,
                11,
            ),
            S::EctaContractApproved => (
                St::EctaContract,
                "Contract Approved",
                "Sales contract approved",
                false,
                false,
                12,
            ),
            S::EctaContractRejected => (
                St::EctaContract,
                "Contract Rejected",
                "Sales contract rejected",
                true,
                false,
                11,
            ),
            S::BankDocumentPending => (
                St::Banking,
                "Documents Pending",
                "Awaiting bank document verification",
                false,
                false,
                13,
            ),
            S::BankDocumentVerified => (
                St::Banking,
                "Documents Verified",
                "Documents verified by commercial bank",
                false,
                false,
                14,
            ),
            S::BankDocumentRejected => (
                St::Banking,
                "Documents Rejected",
                "Documents rejected by commercial bank",
                true,
                false,
                13,
            ),
            S::FxApplicationPending => (
                St::FxApproval,
                "FX Pending",
                "Awaiting national bank FX approval",
                false,
                false,
                15,
            ),
            S::FxApproved => {
                (St::FxApproval, "FX Approved", "Foreign exchange approved", false, false, 16)
            }
            S::FxRejected => {
                (St::FxApproval, "FX Rejected", "Foreign exchange rejected", true, false, 15)
            }
            S::CustomsPending => (
                St::ExportCustoms,
                "Customs Pending",
                "Awaiting export customs clearance",
                false,
                false,
                17,
            ),
            S::CustomsCleared => (
                St::ExportCustoms,
                "Customs Cleared",
                "Cleared by export customs",
                false,
                false,
                18,
            ),
            S::CustomsRejected => (
                St::ExportCustoms,
                "Customs Rejected",
                "Rejected by export customs",
                true,
                false,
                17,
            ),
            S::ShipmentPending => (
                St::Shipping,
                "Shipment Pending",
                "Awaiting shipment scheduling",
                false,
                false,
                19,
            ),
            S::ShipmentScheduled => {
                (St::Shipping, "Shipment Scheduled", "Vessel booked", false, false, 20)
            }
            S::Shipped => (St::Shipping, "Shipped", "Cargo on the water", false, false, 21),
            S::Arrived => {
                (St::Shipping, "Arrived", "Cargo arrived at destination port", false, false, 22)
            }
            S::ImportCustomsPending => (
                St::ImportCustoms,
                "Import Customs Pending",
                "Awaiting import customs clearance",
                false,
                false,
                23,
            ),
            S::ImportCustomsCleared => (
                St::ImportCustoms,
                "Import Customs Cleared",
                "Cleared by import customs",
                false,
                false,
                24,
            ),
            S::ImportCustomsRejected => (
                St::ImportCustoms,
                "Import Customs Rejected",
                "Rejected by import customs",
                true,
                false,
                23,
            ),
            S::Delivered => {
                (St::Delivery, "Delivered", "Goods delivered to the buyer", false, false, 25)
            }
            S::PaymentPending => {
                (St::Payment, "Payment Pending", "Awaiting payment settlement", false, false, 26)
            }
            S::PaymentReceived => {
                (St::Payment, "Payment Received", "Payment received by bank", false, false, 27)
            }
            S::FxRepatriated => (
                St::FxRepatriation,
                "FX Repatriated",
                "Foreign exchange repatriated",
                false,
                false,
                28,
            ),
            S::Completed => (St::Completion, "Completed", "Export completed", false, true, 29),
            S::Cancelled => (St::Cancellation, "Cancelled", "Export cancelled", false, true, 0),
        };

        StatusDefinition {
            status,
            stage,
            label,
            description,
            is_rejection,
            is_terminal,
            progress_weight,
        }
    }

    /// Looks up a raw status string from storage.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::UnknownStatus` if the value is not
    /// registered. An unregistered status on a persisted record is a
    /// data-integrity bug, not a recoverable condition.
    pub fn lookup(raw: &str) -> Result<StatusDefinition, WorkflowError> {
        ExportStatus::parse(raw)
            .map(Self::definition)
            .ok_or_else(|| WorkflowError::UnknownStatus(raw.to_string()))
    }

    /// All stages in pipeline order.
    #[must_use]
    pub fn stages_in_order() -> &'static [Stage] {
        Stage::ALL
    }

    /// Definitions of all registered statuses, in pipeline order.
    pub fn all_definitions() -> impl Iterator<Item = StatusDefinition> {
        ExportStatus::ALL.iter().map(|s| Self::definition(*s))
    }

    /// The largest forward progress weight (the `COMPLETED` weight).
    #[must_use]
    pub fn max_progress_weight() -> u32 {
        Self::definition(ExportStatus::Completed).progress_weight
    }

    /// The pending (entry) status of a stage, if the stage has one.
    ///
    /// Used to anchor rejection statuses to the status they were
    /// rejected from.
    #[must_use]
    pub fn pending_status_of(stage: Stage) -> Option<ExportStatus> {
        Self::all_definitions()
            .filter(|d| d.stage == stage && !d.is_rejection && !d.is_terminal)
            .map(|d| d.status)
            .min_by_key(|s| Self::definition(*s).progress_weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_status_has_a_definition() {
        for status in ExportStatus::ALL {
            let def = StatusRegistry::definition(*status);
            assert_eq!(def.status, *status);
            assert!(Stage::ALL.contains(&def.stage));
            assert!(!def.label.is_empty());
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn test_lookup_known_and_unknown() {
        let def = StatusRegistry::lookup("FX_APPROVED").unwrap();
        assert_eq!(def.status, ExportStatus::FxApproved);
        assert_eq!(def.stage, Stage::FxApproval);

        let err = StatusRegistry::lookup("SHIPMENT_REJECTED").unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownStatus(_)));
    }

    #[test]
    fn test_lookup_normalizes_legacy_alias() {
        let def = StatusRegistry::lookup("QUALITY_CERTIFIED").unwrap();
        assert_eq!(def.status, ExportStatus::EctaQualityApproved);
    }

    #[test]
    fn test_terminal_statuses() {
        let terminals: Vec<_> = StatusRegistry::all_definitions()
            .filter(|d| d.is_terminal)
            .map(|d| d.status)
            .collect();
        assert_eq!(
            terminals,
            vec![ExportStatus::Completed, ExportStatus::Cancelled]
        );
    }

    #[test]
    fn test_rejection_statuses_anchor_to_stage_pending() {
        for def in StatusRegistry::all_definitions().filter(|d| d.is_rejection) {
            let pending = StatusRegistry::pending_status_of(def.stage)
                .expect("rejection stage must have a pending status");
            assert_eq!(
                def.progress_weight,
                StatusRegistry::definition(pending).progress_weight,
                "{} should carry the weight of {}",
                def.status,
                pending
            );
        }
    }

    #[test]
    fn test_forward_weights_strictly_increase() {
        let mut last = 0;
        for def in StatusRegistry::all_definitions()
            .filter(|d| !d.is_rejection && d.status != ExportStatus::Cancelled)
        {
            assert!(
                def.progress_weight > last,
                "{} weight {} not above {}",
                def.status,
                def.progress_weight,
                last
            );
            last = def.progress_weight;
        }
        assert_eq!(last, StatusRegistry::max_progress_weight());
    }

    #[test]
    fn test_stages_in_order() {
        let stages = StatusRegistry::stages_in_order();
        assert_eq!(stages.first(), Some(&Stage::Creation));
        assert_eq!(stages.last(), Some(&Stage::Cancellation));
    }

    #[test]
    fn test_pending_status_of_stage() {
        assert_eq!(
            StatusRegistry::pending_status_of(Stage::FxApproval),
            Some(ExportStatus::FxApplicationPending)
        );
        assert_eq!(
            StatusRegistry::pending_status_of(Stage::Shipping),
            Some(ExportStatus::ShipmentPending)
        );
        assert_eq!(StatusRegistry::pending_status_of(Stage::Cancellation), None);
    }
}
