//! Workflow repository: the engine applying export state transitions.
//!
//! The only component permitted to mutate an export's `status`. Each
//! transition is planned by `cofex-core`, then applied atomically inside
//! a database transaction: a version-checked update of the export row
//! plus an appended history event. A lost version check surfaces as
//! `Conflict` and is never retried here; retries belong to the caller.

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::info;
use uuid::Uuid;

use cofex_core::workflow::service::MAX_AUTOMATIC_HOPS;
use cofex_core::workflow::types::{Action, ExportStatus, TransitionKind, WorkflowAction};
use cofex_core::workflow::{AuthorizationGate, StatusRegistry, WorkflowError, WorkflowService};

use crate::entities::{exports, transition_events};

/// Workflow repository for export state transitions.
#[derive(Debug, Clone)]
pub struct WorkflowRepository {
    db: DatabaseConnection,
}

impl WorkflowRepository {
    /// Creates a new workflow repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a transition to an export on behalf of an actor.
    ///
    /// Loads the record, plans the transition against the authorization
    /// gate and transition table, then atomically updates the status and
    /// appends the history event. Automatic pass-through edges are
    /// followed under the `system` sentinel before returning, bounded by
    /// [`MAX_AUTOMATIC_HOPS`].
    ///
    /// # Errors
    ///
    /// * `WorkflowError::ExportNotFound` if no such export exists
    /// * `WorkflowError::UnknownStatus` if the stored status is not
    ///   registered (data-integrity failure)
    /// * `WorkflowError::TransitionNotAllowed` if the edge is absent or
    ///   the role is not authorized
    /// * `WorkflowError::RejectionReasonRequired` for a rejection with
    ///   no reason
    /// * `WorkflowError::Conflict` if a concurrent transition won the
    ///   version check
    /// * `WorkflowError::Configuration` if automatic edges chain past
    ///   the hop bound
    pub async fn apply_transition(
        &self,
        export_id: Uuid,
        target: ExportStatus,
        actor_role: &str,
        actor_id: Uuid,
        reason: Option<String>,
    ) -> Result<exports::Model, WorkflowError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        let export = exports::Entity::find_by_id(export_id)
            .one(&txn)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?
            .ok_or(WorkflowError::ExportNotFound(export_id))?;

        let current = StatusRegistry::lookup(&export.status)?.status;

        let action =
            WorkflowService::plan(current, target, actor_role, actor_id, reason.as_deref())?;

        let mut version = export.version;
        Self::apply_action(&txn, export_id, version, current, &action).await?;
        version += 1;

        info!(
            export_id = %export_id,
            from = %current,
            to = %action.new_status(),
            role = %action.actor_role(),
            kind = %action.kind(),
            "applied transition"
        );

        // Follow pass-through markers under the system sentinel.
        let mut status = action.new_status();
        let mut hops: u32 = 0;
        while let Some(auto) = WorkflowService::plan_automatic(status) {
            hops += 1;
            if hops > MAX_AUTOMATIC_HOPS {
                return Err(WorkflowError::Configuration(format!(
                    "automatic transition chain from {current} exceeded {MAX_AUTOMATIC_HOPS} hops"
                )));
            }

            Self::apply_action(&txn, export_id, version, status, &auto).await?;
            version += 1;

            info!(
                export_id = %export_id,
                from = %status,
                to = %auto.new_status(),
                "applied automatic transition"
            );
            status = auto.new_status();
        }

        let updated = exports::Entity::find_by_id(export_id)
            .one(&txn)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?
            .ok_or(WorkflowError::ExportNotFound(export_id))?;

        txn.commit()
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        Ok(updated)
    }

    /// Resubmits a rejected export toward its configured resubmission
    /// target.
    ///
    /// Convenience wrapper over [`Self::apply_transition`]; the record
    /// must currently be in a rejection status.
    ///
    /// # Errors
    ///
    /// Returns the same errors as `apply_transition`, plus
    /// `WorkflowError::ResubmissionNotAvailable` if the record is not in
    /// a rejection status.
    pub async fn resubmit(
        &self,
        export_id: Uuid,
        actor_role: &str,
        actor_id: Uuid,
    ) -> Result<exports::Model, WorkflowError> {
        let export = exports::Entity::find_by_id(export_id)
            .one(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?
            .ok_or(WorkflowError::ExportNotFound(export_id))?;

        let current = StatusRegistry::lookup(&export.status)?.status;
        let target = WorkflowService::resubmission_target(current)?;

        self.apply_transition(export_id, target, actor_role, actor_id, None)
            .await
    }

    /// Actions the acting role may perform on an export right now.
    ///
    /// Read-only; the command path re-validates regardless of what the
    /// client rendered.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ExportNotFound`, `UnknownStatus`, or
    /// `UnknownRole`.
    pub async fn available_actions_for(
        &self,
        export_id: Uuid,
        actor_role: &str,
    ) -> Result<Vec<Action>, WorkflowError> {
        let export = exports::Entity::find_by_id(export_id)
            .one(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?
            .ok_or(WorkflowError::ExportNotFound(export_id))?;

        let current = StatusRegistry::lookup(&export.status)?.status;
        AuthorizationGate::available_actions(current, actor_role)
    }

    /// The immutable transition history of an export, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::ExportNotFound` if no such export exists.
    pub async fn history_of(
        &self,
        export_id: Uuid,
    ) -> Result<Vec<transition_events::Model>, WorkflowError> {
        let exists = exports::Entity::find_by_id(export_id)
            .one(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;
        if exists.is_none() {
            return Err(WorkflowError::ExportNotFound(export_id));
        }

        transition_events::Entity::find()
            .filter(transition_events::Column::ExportId.eq(export_id))
            .order_by_asc(transition_events::Column::Seq)
            .all(&self.db)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    /// Applies one planned hop: version-checked row update plus history
    /// event, inside the caller's transaction.
    async fn apply_action(
        txn: &DatabaseTransaction,
        export_id: Uuid,
        expected_version: i32,
        from: ExportStatus,
        action: &WorkflowAction,
    ) -> Result<(), WorkflowError> {
        let now = Utc::now().into();
        let new_status = action.new_status();

        let mut update = exports::Entity::update_many()
            .col_expr(exports::Column::Status, Expr::value(new_status.as_str()))
            .col_expr(exports::Column::Version, Expr::value(expected_version + 1))
            .col_expr(exports::Column::UpdatedAt, Expr::value(now));

        match action.kind() {
            TransitionKind::Rejection => {
                update = update
                    .col_expr(
                        exports::Column::RejectionReason,
                        Expr::value(action.event_reason()),
                    )
                    .col_expr(exports::Column::RejectedBy, Expr::value(action.actor_id()))
                    .col_expr(exports::Column::RejectedAt, Expr::value(Some(now)));
            }
            TransitionKind::Resubmission => {
                // Cleared on the live record; history retains them.
                update = update
                    .col_expr(exports::Column::RejectionReason, Expr::value(None::<String>))
                    .col_expr(exports::Column::RejectedBy, Expr::value(None::<Uuid>))
                    .col_expr(
                        exports::Column::RejectedAt,
                        Expr::value(None::<sea_orm::prelude::DateTimeWithTimeZone>),
                    );
            }
            TransitionKind::Approval | TransitionKind::Automatic => {}
        }

        let result = update
            .filter(exports::Column::ExportId.eq(export_id))
            .filter(exports::Column::Version.eq(expected_version))
            .exec(txn)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(WorkflowError::Conflict(export_id));
        }

        let event = transition_events::ActiveModel {
            id: Set(Uuid::new_v4()),
            export_id: Set(export_id),
            seq: Set(expected_version + 1),
            from_status: Set(from.as_str().to_string()),
            to_status: Set(new_status.as_str().to_string()),
            actor_role: Set(action.actor_role().as_str().to_string()),
            actor_id: Set(action.actor_id()),
            reason: Set(action.event_reason().map(ToString::to_string)),
            created_at: Set(now),
        };

        event
            .insert(txn)
            .await
            .map_err(|e| WorkflowError::Database(e.to_string()))?;

        Ok(())
    }
}
