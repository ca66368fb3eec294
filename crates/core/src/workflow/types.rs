//! Workflow domain types for the export lifecycle.
//!
//! This module defines the canonical status vocabulary, the pipeline
//! stages, the actor roles that may trigger transitions, and the
//! audit-carrying action produced when a transition is planned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Ordered phase of the export pipeline.
///
/// Each status belongs to exactly one stage. `Cancellation` carries
/// order 0 so that a cancelled export sorts before any live one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Export record created, not yet submitted.
    Creation,
    /// Commodity exchange lot verification.
    EcxVerification,
    /// Export license approval.
    EctaLicense,
    /// Coffee quality certification.
    EctaQuality,
    /// Origin verification.
    EctaOrigin,
    /// Sales contract approval.
    EctaContract,
    /// Commercial bank document verification.
    Banking,
    /// Foreign-exchange approval by the national bank.
    FxApproval,
    /// Export-side customs clearance.
    ExportCustoms,
    /// Vessel scheduling through arrival.
    Shipping,
    /// Import-side customs clearance.
    ImportCustoms,
    /// Goods handed over at destination.
    Delivery,
    /// Payment settlement.
    Payment,
    /// Foreign-exchange repatriation.
    FxRepatriation,
    /// Pipeline finished.
    Completion,
    /// Export abandoned.
    Cancellation,
}

impl Stage {
    /// All stages in pipeline order, `Cancellation` last.
    pub const ALL: &'static [Self] = &[
        Self::Creation,
        Self::EcxVerification,
        Self::EctaLicense,
        Self::EctaQuality,
        Self::EctaOrigin,
        Self::EctaContract,
        Self::Banking,
        Self::FxApproval,
        Self::ExportCustoms,
        Self::Shipping,
        Self::ImportCustoms,
        Self::Delivery,
        Self::Payment,
        Self::FxRepatriation,
        Self::Completion,
        Self::Cancellation,
    ];

    /// Display name of the stage.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Creation => "Creation",
            Self::EcxVerification => "ECX Verification",
            Self::EctaLicense => "ECTA License",
            Self::EctaQuality => "ECTA Quality",
            Self::EctaOrigin => "ECTA Origin",
            Self::EctaContract => "ECTA Contract",
            Self::Banking => "Banking",
            Self::FxApproval => "FX Approval",
            Self::ExportCustoms => "Export Customs",
            Self::Shipping => "Shipping",
            Self::ImportCustoms => "Import Customs",
            Self::Delivery => "Delivery",
            Self::Payment => "Payment",
            Self::FxRepatriation => "FX Repatriation",
            Self::Completion => "Completion",
            Self::Cancellation => "Cancellation",
        }
    }

    /// Pipeline order of the stage (Cancellation is 0).
    #[must_use]
    pub fn order(&self) -> u8 {
        match self {
            Self::Cancellation => 0,
            Self::Creation => 1,
            Self::EcxVerification => 2,
            Self::EctaLicense => 3,
            Self::EctaQuality => 4,
            Self::EctaOrigin => 5,
            Self::EctaContract => 6,
            Self::Banking => 7,
            Self::FxApproval => 8,
            Self::ExportCustoms => 9,
            Self::Shipping => 10,
            Self::ImportCustoms => 11,
            Self::Delivery => 12,
            Self::Payment => 13,
            Self::FxRepatriation => 14,
            Self::Completion => 15,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Export status in the lifecycle pipeline.
///
/// The canonical vocabulary, one status per approval/rejection step of
/// each stage. Legacy names from the older workflow manager are accepted
/// by [`ExportStatus::parse`] and normalized to these variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExportStatus {
    /// Record created, editable, not yet submitted.
    Draft,
    /// Record created and awaiting submission to ECX.
    Pending,
    /// Awaiting ECX lot verification.
    EcxPending,
    /// Lot verified by ECX.
    EcxVerified,
    /// Lot rejected by ECX.
    EcxRejected,
    /// Awaiting ECTA license approval.
    EctaLicensePending,
    /// Export license approved.
    EctaLicenseApproved,
    /// Export license rejected.
    EctaLicenseRejected,
    /// Awaiting ECTA quality certification.
    EctaQualityPending,
    /// Quality certified by ECTA.
    EctaQualityApproved,
    /// Quality certification rejected.
    EctaQualityRejected,
    /// Awaiting origin verification.
    EctaOriginPending,
    /// Origin verified.
    EctaOriginApproved,
    /// Origin verification rejected.
    EctaOriginRejected,
    /// Awaiting sales contract approval.
    EctaContractPending,
    /// Sales contract approved.
    EctaContractApproved,
    /// Sales contract rejected.
    EctaContractRejected,
    /// Awaiting bank document verification.
    BankDocumentPending,
    /// Documents verified by the commercial bank.
    BankDocumentVerified,
    /// Documents rejected by the commercial bank.
    BankDocumentRejected,
    /// FX application filed, awaiting national bank decision.
    FxApplicationPending,
    /// Foreign exchange approved.
    FxApproved,
    /// Foreign exchange rejected.
    FxRejected,
    /// Awaiting export customs clearance.
    CustomsPending,
    /// Cleared by export customs.
    CustomsCleared,
    /// Rejected by export customs.
    CustomsRejected,
    /// Awaiting shipment scheduling.
    ShipmentPending,
    /// Vessel booked.
    ShipmentScheduled,
    /// Cargo on the water.
    Shipped,
    /// Cargo arrived at destination port.
    Arrived,
    /// Awaiting import customs clearance.
    ImportCustomsPending,
    /// Cleared by import customs.
    ImportCustomsCleared,
    /// Rejected by import customs.
    ImportCustomsRejected,
    /// Goods delivered to the buyer.
    Delivered,
    /// Awaiting payment settlement.
    PaymentPending,
    /// Payment received by the commercial bank.
    PaymentReceived,
    /// Foreign exchange repatriated.
    FxRepatriated,
    /// Pipeline finished (terminal).
    Completed,
    /// Export abandoned (terminal).
    Cancelled,
}

impl ExportStatus {
    /// All canonical statuses, in pipeline order.
    pub const ALL: &'static [Self] = &[
        Self::Draft,
        Self::Pending,
        Self::EcxPending,
        Self::EcxVerified,
        Self::EcxRejected,
        Self::EctaLicensePending,
        Self::EctaLicenseApproved,
        Self::EctaLicenseRejected,
        Self::EctaQualityPending,
        Self::EctaQualityApproved,
        Self::EctaQualityRejected,
        Self::EctaOriginPending,
        Self::EctaOriginApproved,
        Self::EctaOriginRejected,
        Self::EctaContractPending,
        Self::EctaContractApproved,
        Self::EctaContractRejected,
        Self::BankDocumentPending,
        Self::BankDocumentVerified,
        Self::BankDocumentRejected,
        Self::FxApplicationPending,
        Self::FxApproved,
        Self::FxRejected,
        Self::CustomsPending,
        Self::CustomsCleared,
        Self::CustomsRejected,
        Self::ShipmentPending,
        Self::ShipmentScheduled,
        Self::Shipped,
        Self::Arrived,
        Self::ImportCustomsPending,
        Self::ImportCustomsCleared,
        Self::ImportCustomsRejected,
        Self::Delivered,
        Self::PaymentPending,
        Self::PaymentReceived,
        Self::FxRepatriated,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the wire representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::Pending => "PENDING",
            Self::EcxPending => "ECX_PENDING",
            Self::EcxVerified => "ECX_VERIFIED",
            Self::EcxRejected => "ECX_REJECTED",
            Self::EctaLicensePending => "ECTA_LICENSE_PENDING",
            Self::EctaLicenseApproved => "ECTA_LICENSE_APPROVED",
            Self::EctaLicenseRejected => "ECTA_LICENSE_REJECTED",
            Self::EctaQualityPending => "ECTA_QUALITY_PENDING",
            Self::EctaQualityApproved => "ECTA_QUALITY_APPROVED",
            Self::EctaQualityRejected => "ECTA_QUALITY_REJECTED",
            Self::EctaOriginPending => "ECTA_ORIGIN_PENDING",
            Self::EctaOriginApproved => "ECTA_ORIGIN_APPROVED",
            Self::EctaOriginRejected => "ECTA_ORIGIN_REJECTED",
            Self::EctaContractPending => "ECTA_CONTRACT_PENDING",
            Self::EctaContractApproved => "ECTA_CONTRACT_APPROVED",
            Self::EctaContractRejected => "ECTA_CONTRACT_REJECTED",
            Self::BankDocumentPending => "BANK_DOCUMENT_PENDING",
            Self::BankDocumentVerified => "BANK_DOCUMENT_VERIFIED",
            Self::BankDocumentRejected => "BANK_DOCUMENT_REJECTED",
            Self::FxApplicationPending => "FX_APPLICATION_PENDING",
            Self::FxApproved => "FX_APPROVED",
            Self::FxRejected => "FX_REJECTED",
            Self::CustomsPending => "CUSTOMS_PENDING",
            Self::CustomsCleared => "CUSTOMS_CLEARED",
            Self::CustomsRejected => "CUSTOMS_REJECTED",
            Self::ShipmentPending => "SHIPMENT_PENDING",
            Self::ShipmentScheduled => "SHIPMENT_SCHEDULED",
            Self::Shipped => "SHIPPED",
            Self::Arrived => "ARRIVED",
            Self::ImportCustomsPending => "IMPORT_CUSTOMS_PENDING",
            Self::ImportCustomsCleared => "IMPORT_CUSTOMS_CLEARED",
            Self::ImportCustomsRejected => "IMPORT_CUSTOMS_REJECTED",
            Self::Delivered => "DELIVERED",
            Self::PaymentPending => "PAYMENT_PENDING",
            Self::PaymentReceived => "PAYMENT_RECEIVED",
            Self::FxRepatriated => "FX_REPATRIATED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Parses a status from a string.
    ///
    /// Accepts canonical names plus the legacy aliases from the older
    /// workflow manager (`QUALITY_CERTIFIED`, `FX_PENDING`, ...), which
    /// are normalized to their canonical variant.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "DRAFT" => Some(Self::Draft),
            "PENDING" => Some(Self::Pending),
            "ECX_PENDING" => Some(Self::EcxPending),
            "ECX_VERIFIED" => Some(Self::EcxVerified),
            "ECX_REJECTED" => Some(Self::EcxRejected),
            "ECTA_LICENSE_PENDING" => Some(Self::EctaLicensePending),
            "ECTA_LICENSE_APPROVED" => Some(Self::EctaLicenseApproved),
            "ECTA_LICENSE_REJECTED" | "LICENSE_REJECTED" => Some(Self::EctaLicenseRejected),
            "ECTA_QUALITY_PENDING" | "QUALITY_PENDING" => Some(Self::EctaQualityPending),
            "ECTA_QUALITY_APPROVED" | "QUALITY_CERTIFIED" => Some(Self::EctaQualityApproved),
            "ECTA_QUALITY_REJECTED" | "QUALITY_REJECTED" => Some(Self::EctaQualityRejected),
            "ECTA_ORIGIN_PENDING" => Some(Self::EctaOriginPending),
            "ECTA_ORIGIN_APPROVED" => Some(Self::EctaOriginApproved),
            "ECTA_ORIGIN_REJECTED" => Some(Self::EctaOriginRejected),
            "ECTA_CONTRACT_PENDING" => Some(Self::EctaContractPending),
            "ECTA_CONTRACT_APPROVED" => Some(Self::EctaContractApproved),
            "ECTA_CONTRACT_REJECTED" | "CONTRACT_REJECTED" => Some(Self::EctaContractRejected),
            "BANK_DOCUMENT_PENDING" | "BANKING_PENDING" => Some(Self::BankDocumentPending),
            "BANK_DOCUMENT_VERIFIED" | "BANKING_APPROVED" => Some(Self::BankDocumentVerified),
            "BANK_DOCUMENT_REJECTED" => Some(Self::BankDocumentRejected),
            "FX_APPLICATION_PENDING" | "FX_PENDING" => Some(Self::FxApplicationPending),
            "FX_APPROVED" => Some(Self::FxApproved),
            "FX_REJECTED" => Some(Self::FxRejected),
            "CUSTOMS_PENDING" | "EXPORT_CUSTOMS_PENDING" => Some(Self::CustomsPending),
            "CUSTOMS_CLEARED" | "EXPORT_CUSTOMS_CLEARED" => Some(Self::CustomsCleared),
            "CUSTOMS_REJECTED" | "EXPORT_CUSTOMS_REJECTED" => Some(Self::CustomsRejected),
            "SHIPMENT_PENDING" => Some(Self::ShipmentPending),
            "SHIPMENT_SCHEDULED" => Some(Self::ShipmentScheduled),
            "SHIPPED" => Some(Self::Shipped),
            "ARRIVED" => Some(Self::Arrived),
            "IMPORT_CUSTOMS_PENDING" => Some(Self::ImportCustomsPending),
            "IMPORT_CUSTOMS_CLEARED" => Some(Self::ImportCustomsCleared),
            "IMPORT_CUSTOMS_REJECTED" => Some(Self::ImportCustomsRejected),
            "DELIVERED" => Some(Self::Delivered),
            "PAYMENT_PENDING" => Some(Self::PaymentPending),
            "PAYMENT_RECEIVED" => Some(Self::PaymentReceived),
            "FX_REPATRIATED" => Some(Self::FxRepatriated),
            "COMPLETED" => Some(Self::Completed),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Returns the stage this status belongs to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        super::registry::StatusRegistry::definition(*self).stage
    }

    /// Returns true if this status is reachable only via rejection.
    #[must_use]
    pub fn is_rejection(&self) -> bool {
        super::registry::StatusRegistry::definition(*self).is_rejection
    }

    /// Returns true if no further transitions are possible.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        super::registry::StatusRegistry::definition(*self).is_terminal
    }
}

impl fmt::Display for ExportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Role of the actor invoking a transition.
///
/// One role per organization in the export chain, plus the `system`
/// sentinel reserved for automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActorRole {
    /// The exporting business.
    Exporter,
    /// Commodity exchange inspector.
    Ecx,
    /// Coffee and tea authority officer.
    Ecta,
    /// Commercial bank officer.
    CommercialBank,
    /// National bank (FX) officer.
    NationalBank,
    /// Customs officer (export and import side).
    Customs,
    /// Shipping line operator.
    Shipper,
    /// Sentinel for engine-triggered automatic transitions.
    System,
}

impl ActorRole {
    /// All roles, the `system` sentinel last.
    pub const ALL: &'static [Self] = &[
        Self::Exporter,
        Self::Ecx,
        Self::Ecta,
        Self::CommercialBank,
        Self::NationalBank,
        Self::Customs,
        Self::Shipper,
        Self::System,
    ];

    /// Parses a role from a string, case-insensitively.
    ///
    /// The legacy short names `bank` and `nbe` normalize to
    /// `commercial-bank` and `national-bank`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "exporter" => Some(Self::Exporter),
            "ecx" => Some(Self::Ecx),
            "ecta" => Some(Self::Ecta),
            "commercial-bank" | "bank" => Some(Self::CommercialBank),
            "national-bank" | "nbe" => Some(Self::NationalBank),
            "customs" => Some(Self::Customs),
            "shipper" => Some(Self::Shipper),
            "system" => Some(Self::System),
            _ => None,
        }
    }

    /// Returns the string representation of the role.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exporter => "exporter",
            Self::Ecx => "ecx",
            Self::Ecta => "ecta",
            Self::CommercialBank => "commercial-bank",
            Self::NationalBank => "national-bank",
            Self::Customs => "customs",
            Self::Shipper => "shipper",
            Self::System => "system",
        }
    }

    /// Returns true for the automatic-transition sentinel.
    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Self::System)
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a transition edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Forward progress through the pipeline.
    Approval,
    /// Stall into a rejection status; requires a reason.
    Rejection,
    /// Return from a rejection status to its stage's pending status.
    Resubmission,
    /// Engine-triggered pass-through under the `system` sentinel.
    Automatic,
}

impl TransitionKind {
    /// Returns the string representation of the kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approval => "approval",
            Self::Rejection => "rejection",
            Self::Resubmission => "resubmission",
            Self::Automatic => "automatic",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An action available to an actor in the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Action {
    /// Status the action would move the export to.
    pub target: ExportStatus,
    /// Classification of the edge.
    pub kind: TransitionKind,
}

/// Planned transition with audit data.
///
/// Produced by the planning service once a transition has been validated;
/// the engine persists it as a history event and status update.
#[derive(Debug, Clone)]
pub enum WorkflowAction {
    /// Forward progress triggered by an authorized actor.
    Approval {
        /// The status after the transition.
        new_status: ExportStatus,
        /// Role of the acting organization.
        actor_role: ActorRole,
        /// The acting user.
        actor_id: Uuid,
        /// When the transition was planned.
        occurred_at: DateTime<Utc>,
        /// Optional note from the approver.
        notes: Option<String>,
    },
    /// Stall into a rejection status.
    Rejection {
        /// The rejection status.
        new_status: ExportStatus,
        /// Role of the rejecting organization.
        actor_role: ActorRole,
        /// The acting user.
        actor_id: Uuid,
        /// When the transition was planned.
        occurred_at: DateTime<Utc>,
        /// The mandatory rejection reason.
        reason: String,
    },
    /// Return from a rejection status to active review.
    Resubmission {
        /// The stage-pending status being returned to.
        new_status: ExportStatus,
        /// Role of the resubmitting actor.
        actor_role: ActorRole,
        /// The acting user.
        actor_id: Uuid,
        /// When the transition was planned.
        occurred_at: DateTime<Utc>,
    },
    /// Engine-triggered pass-through hop.
    Automatic {
        /// The status after the hop.
        new_status: ExportStatus,
        /// When the hop was planned.
        occurred_at: DateTime<Utc>,
    },
}

impl WorkflowAction {
    /// Returns the status resulting from this action.
    #[must_use]
    pub fn new_status(&self) -> ExportStatus {
        match self {
            Self::Approval { new_status, .. }
            | Self::Rejection { new_status, .. }
            | Self::Resubmission { new_status, .. }
            | Self::Automatic { new_status, .. } => *new_status,
        }
    }

    /// Returns the kind of edge this action traverses.
    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        match self {
            Self::Approval { .. } => TransitionKind::Approval,
            Self::Rejection { .. } => TransitionKind::Rejection,
            Self::Resubmission { .. } => TransitionKind::Resubmission,
            Self::Automatic { .. } => TransitionKind::Automatic,
        }
    }

    /// Returns the acting role (`system` for automatic hops).
    #[must_use]
    pub fn actor_role(&self) -> ActorRole {
        match self {
            Self::Approval { actor_role, .. }
            | Self::Rejection { actor_role, .. }
            | Self::Resubmission { actor_role, .. } => *actor_role,
            Self::Automatic { .. } => ActorRole::System,
        }
    }

    /// Returns the acting user, if any (automatic hops have none).
    #[must_use]
    pub fn actor_id(&self) -> Option<Uuid> {
        match self {
            Self::Approval { actor_id, .. }
            | Self::Rejection { actor_id, .. }
            | Self::Resubmission { actor_id, .. } => Some(*actor_id),
            Self::Automatic { .. } => None,
        }
    }

    /// Returns when the action was planned.
    #[must_use]
    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            Self::Approval { occurred_at, .. }
            | Self::Rejection { occurred_at, .. }
            | Self::Resubmission { occurred_at, .. }
            | Self::Automatic { occurred_at, .. } => *occurred_at,
        }
    }

    /// Returns the reason or note to record on the history event.
    #[must_use]
    pub fn event_reason(&self) -> Option<&str> {
        match self {
            Self::Rejection { reason, .. } => Some(reason),
            Self::Approval { notes, .. } => notes.as_deref(),
            Self::Resubmission { .. } | Self::Automatic { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_as_str_parse_round_trip() {
        for status in ExportStatus::ALL {
            assert_eq!(ExportStatus::parse(status.as_str()), Some(*status));
        }
    }

    #[test]
    fn test_status_parse_case_insensitive() {
        assert_eq!(
            ExportStatus::parse("fx_approved"),
            Some(ExportStatus::FxApproved)
        );
        assert_eq!(
            ExportStatus::parse("Ecx_Pending"),
            Some(ExportStatus::EcxPending)
        );
    }

    #[test]
    fn test_status_parse_legacy_aliases() {
        assert_eq!(
            ExportStatus::parse("QUALITY_CERTIFIED"),
            Some(ExportStatus::EctaQualityApproved)
        );
        assert_eq!(
            ExportStatus::parse("LICENSE_REJECTED"),
            Some(ExportStatus::EctaLicenseRejected)
        );
        assert_eq!(
            ExportStatus::parse("FX_PENDING"),
            Some(ExportStatus::FxApplicationPending)
        );
        assert_eq!(
            ExportStatus::parse("BANKING_APPROVED"),
            Some(ExportStatus::BankDocumentVerified)
        );
        assert_eq!(
            ExportStatus::parse("EXPORT_CUSTOMS_CLEARED"),
            Some(ExportStatus::CustomsCleared)
        );
    }

    #[test]
    fn test_status_parse_invalid() {
        assert_eq!(ExportStatus::parse("SHIPMENT_REJECTED"), None);
        assert_eq!(ExportStatus::parse(""), None);
        assert_eq!(ExportStatus::parse("nonsense"), None);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            format!("{}", ExportStatus::EctaContractApproved),
            "ECTA_CONTRACT_APPROVED"
        );
    }

    #[test]
    fn test_role_parse_round_trip() {
        for role in ActorRole::ALL {
            assert_eq!(ActorRole::parse(role.as_str()), Some(*role));
        }
    }

    #[test]
    fn test_role_parse_legacy_aliases() {
        assert_eq!(ActorRole::parse("bank"), Some(ActorRole::CommercialBank));
        assert_eq!(ActorRole::parse("nbe"), Some(ActorRole::NationalBank));
        assert_eq!(ActorRole::parse("NATIONAL-BANK"), Some(ActorRole::NationalBank));
        assert_eq!(ActorRole::parse("approver"), None);
    }

    #[test]
    fn test_system_role_sentinel() {
        assert!(ActorRole::System.is_system());
        assert!(!ActorRole::Exporter.is_system());
    }

    #[test]
    fn test_stage_order_covers_pipeline() {
        let mut seen = std::collections::HashSet::new();
        for stage in Stage::ALL {
            assert!(seen.insert(stage.order()), "duplicate order {}", stage.order());
        }
        assert_eq!(Stage::ALL.len(), 16);
        assert_eq!(Stage::Cancellation.order(), 0);
        assert_eq!(Stage::Completion.order(), 15);
    }

    #[test]
    fn test_workflow_action_accessors() {
        let id = Uuid::new_v4();
        let action = WorkflowAction::Rejection {
            new_status: ExportStatus::FxRejected,
            actor_role: ActorRole::NationalBank,
            actor_id: id,
            occurred_at: Utc::now(),
            reason: "insufficient documentation".to_string(),
        };
        assert_eq!(action.new_status(), ExportStatus::FxRejected);
        assert_eq!(action.kind(), TransitionKind::Rejection);
        assert_eq!(action.actor_role(), ActorRole::NationalBank);
        assert_eq!(action.actor_id(), Some(id));
        assert_eq!(action.event_reason(), Some("insufficient documentation"));

        let auto = WorkflowAction::Automatic {
            new_status: ExportStatus::CustomsPending,
            occurred_at: Utc::now(),
        };
        assert_eq!(auto.actor_role(), ActorRole::System);
        assert_eq!(auto.actor_id(), None);
        assert_eq!(auto.event_reason(), None);
    }
}
