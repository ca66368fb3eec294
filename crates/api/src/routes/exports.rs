//! Export workflow routes.
//!
//! The UI renders only what `GET .../actions` returns, and the command
//! path re-validates every transition regardless; the client is never
//! trusted to have computed legality itself.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::str::FromStr;
use tracing::{error, info};
use uuid::Uuid;

use crate::{AppState, middleware::AuthUser};
use cofex_core::workflow::types::{Action, ActorRole, ExportStatus};
use cofex_core::workflow::{ProgressCalculator, StatusRegistry, WorkflowError};
use cofex_db::entities::{exports, transition_events};
use cofex_db::repositories::export::{CreateExportInput, ExportFilter, ExportRepository};
use cofex_db::repositories::workflow::WorkflowRepository;
use cofex_shared::AppError;
use cofex_shared::types::{PageRequest, PageResponse};

/// Creates the export workflow routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exports", get(list_exports).post(create_export))
        .route("/exports/stats", get(export_stats))
        .route("/exports/{export_id}", get(get_export))
        .route("/exports/{export_id}/transition", post(apply_transition))
        .route("/exports/{export_id}/resubmit", post(resubmit_export))
        .route("/exports/{export_id}/actions", get(available_actions))
        .route("/exports/{export_id}/history", get(export_history))
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for creating an export.
#[derive(Debug, Deserialize)]
pub struct CreateExportRequest {
    /// Coffee variety.
    pub coffee_type: String,
    /// Quantity in kilograms (decimal string).
    pub quantity_kg: String,
    /// Declared value in USD (decimal string).
    pub value_usd: String,
    /// Destination country.
    pub destination_country: String,
    /// Create as DRAFT instead of PENDING.
    #[serde(default)]
    pub draft: bool,
}

/// Request body for applying a transition.
#[derive(Debug, Deserialize)]
pub struct TransitionRequest {
    /// Target status (wire form, e.g. `FX_APPROVED`).
    pub target_status: String,
    /// Rejection reason or approval note.
    pub reason: Option<String>,
}

/// Query parameters for listing exports.
#[derive(Debug, Deserialize)]
pub struct ListExportsQuery {
    /// Filter by current status.
    pub status: Option<String>,
    /// Filter by exporter ID.
    pub exporter: Option<Uuid>,
    /// Page number (1-indexed).
    pub page: Option<u32>,
    /// Items per page.
    pub per_page: Option<u32>,
}

/// Response for an export record.
#[derive(Debug, Serialize)]
pub struct ExportResponse {
    /// Export ID.
    pub export_id: Uuid,
    /// Exporter ID.
    pub exporter_id: Uuid,
    /// Coffee variety.
    pub coffee_type: String,
    /// Quantity in kilograms.
    pub quantity_kg: String,
    /// Declared value in USD.
    pub value_usd: String,
    /// Destination country.
    pub destination_country: String,
    /// Current status (wire form).
    pub status: String,
    /// Display label for the status.
    pub status_label: &'static str,
    /// Stage the status belongs to.
    pub stage: &'static str,
    /// Completion percentage in [0, 100].
    pub progress: u8,
    /// Optimistic-concurrency version (equals history length).
    pub version: i32,
    /// Rejection reason, while in a rejection status.
    pub rejection_reason: Option<String>,
    /// Who rejected, while in a rejection status.
    pub rejected_by: Option<Uuid>,
    /// When rejected, while in a rejection status.
    pub rejected_at: Option<String>,
    /// Created at timestamp.
    pub created_at: String,
    /// Updated at timestamp.
    pub updated_at: String,
}

impl ExportResponse {
    fn from_model(model: exports::Model) -> Result<Self, WorkflowError> {
        let def = StatusRegistry::lookup(&model.status)?;
        Ok(Self {
            export_id: model.export_id,
            exporter_id: model.exporter_id,
            coffee_type: model.coffee_type,
            quantity_kg: model.quantity_kg.to_string(),
            value_usd: model.value_usd.to_string(),
            destination_country: model.destination_country,
            status: def.status.as_str().to_string(),
            status_label: def.label,
            stage: def.stage.name(),
            progress: ProgressCalculator::progress_of(def.status),
            version: model.version,
            rejection_reason: model.rejection_reason,
            rejected_by: model.rejected_by,
            rejected_at: model.rejected_at.map(|t| t.to_rfc3339()),
            created_at: model.created_at.to_rfc3339(),
            updated_at: model.updated_at.to_rfc3339(),
        })
    }
}

/// Response for an available action.
#[derive(Debug, Serialize)]
pub struct ActionResponse {
    /// Target status of the action.
    pub target_status: &'static str,
    /// Edge kind (approval, rejection, resubmission).
    pub kind: &'static str,
}

impl From<Action> for ActionResponse {
    fn from(action: Action) -> Self {
        Self {
            target_status: action.target.as_str(),
            kind: action.kind.as_str(),
        }
    }
}

/// Response for a transition history event.
#[derive(Debug, Serialize)]
pub struct EventResponse {
    /// 1-based position in the history.
    pub seq: i32,
    /// Status before the transition.
    pub from_status: String,
    /// Status after the transition.
    pub to_status: String,
    /// Acting role (`system` for automatic hops).
    pub actor_role: String,
    /// Acting user, absent for automatic hops.
    pub actor_id: Option<Uuid>,
    /// Rejection reason or approval note.
    pub reason: Option<String>,
    /// When the transition was recorded.
    pub occurred_at: String,
}

impl From<transition_events::Model> for EventResponse {
    fn from(event: transition_events::Model) -> Self {
        Self {
            seq: event.seq,
            from_status: event.from_status,
            to_status: event.to_status,
            actor_role: event.actor_role,
            actor_id: event.actor_id,
            reason: event.reason,
            occurred_at: event.created_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Error mapping
// ============================================================================

/// Maps a workflow error to its HTTP response.
///
/// Server-class errors are logged and returned without internal detail.
fn workflow_error_response(err: &WorkflowError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "workflow operation failed");
        return (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": "An internal error occurred"
            })),
        )
            .into_response();
    }

    (
        status,
        Json(json!({ "error": err.error_code(), "message": err.to_string() })),
    )
        .into_response()
}

/// Maps an application error to its HTTP response.
fn app_error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    if status.is_server_error() {
        error!(error = %err, "export operation failed");
        return (
            status,
            Json(json!({
                "error": err.error_code(),
                "message": "An internal error occurred"
            })),
        )
            .into_response();
    }

    (
        status,
        Json(json!({ "error": err.error_code(), "message": err.to_string() })),
    )
        .into_response()
}

fn export_response_or_error(model: exports::Model) -> Response {
    match ExportResponse::from_model(model) {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => workflow_error_response(&e),
    }
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST `/exports` - Create an export record (exporter only).
async fn create_export(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<CreateExportRequest>,
) -> impl IntoResponse {
    if ActorRole::parse(auth.role()) != Some(ActorRole::Exporter) {
        return (
            StatusCode::FORBIDDEN,
            Json(json!({
                "error": "FORBIDDEN",
                "message": "Only exporters may create export records"
            })),
        )
            .into_response();
    }

    let Ok(quantity_kg) = Decimal::from_str(&body.quantity_kg) else {
        return app_error_response(&AppError::Validation(
            "quantity_kg must be a decimal number".to_string(),
        ));
    };
    let Ok(value_usd) = Decimal::from_str(&body.value_usd) else {
        return app_error_response(&AppError::Validation(
            "value_usd must be a decimal number".to_string(),
        ));
    };

    let repo = ExportRepository::new((*state.db).clone());
    let input = CreateExportInput {
        exporter_id: auth.actor_id(),
        coffee_type: body.coffee_type,
        quantity_kg,
        value_usd,
        destination_country: body.destination_country,
        as_draft: body.draft,
    };

    match repo.create_export(input).await {
        Ok(model) => {
            info!(export_id = %model.export_id, exporter = %model.exporter_id, "export created");
            match ExportResponse::from_model(model) {
                Ok(response) => (StatusCode::CREATED, Json(response)).into_response(),
                Err(e) => workflow_error_response(&e),
            }
        }
        Err(e) => app_error_response(&e),
    }
}

/// GET `/exports` - List exports with filters and pagination.
async fn list_exports(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<ListExportsQuery>,
) -> impl IntoResponse {
    let status = match &query.status {
        Some(raw) => match ExportStatus::parse(raw) {
            Some(status) => Some(status),
            None => {
                return workflow_error_response(&WorkflowError::InvalidTargetStatus(raw.clone()));
            }
        },
        None => None,
    };

    let page = PageRequest {
        page: query.page.unwrap_or(1).max(1),
        per_page: query.per_page.unwrap_or(20).clamp(1, 100),
    };

    let repo = ExportRepository::new((*state.db).clone());
    let filter = ExportFilter {
        status,
        exporter_id: query.exporter,
    };

    match repo.list_exports(filter, &page).await {
        Ok((models, total)) => {
            let mut items = Vec::with_capacity(models.len());
            for model in models {
                match ExportResponse::from_model(model) {
                    Ok(item) => items.push(item),
                    Err(e) => return workflow_error_response(&e),
                }
            }
            let body = PageResponse::new(items, page.page, page.per_page, total);
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => app_error_response(&e),
    }
}

/// GET `/exports/{export_id}` - Fetch a single export.
async fn get_export(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(export_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = ExportRepository::new((*state.db).clone());
    match repo.get_export(export_id).await {
        Ok(model) => export_response_or_error(model),
        Err(e) => app_error_response(&e),
    }
}

/// POST `/exports/{export_id}/transition` - Apply a workflow transition.
///
/// Actor identity and role come from the authenticated session, never
/// from the request body.
async fn apply_transition(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(export_id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> impl IntoResponse {
    let Some(target) = ExportStatus::parse(&body.target_status) else {
        return workflow_error_response(&WorkflowError::InvalidTargetStatus(body.target_status));
    };

    let repo = WorkflowRepository::new((*state.db).clone());
    match repo
        .apply_transition(export_id, target, auth.role(), auth.actor_id(), body.reason)
        .await
    {
        Ok(model) => export_response_or_error(model),
        Err(e) => workflow_error_response(&e),
    }
}

/// POST `/exports/{export_id}/resubmit` - Resubmit a rejected export.
async fn resubmit_export(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(export_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = WorkflowRepository::new((*state.db).clone());
    match repo
        .resubmit(export_id, auth.role(), auth.actor_id())
        .await
    {
        Ok(model) => export_response_or_error(model),
        Err(e) => workflow_error_response(&e),
    }
}

/// GET `/exports/{export_id}/actions` - Actions available to the caller.
async fn available_actions(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(export_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = WorkflowRepository::new((*state.db).clone());
    match repo.available_actions_for(export_id, auth.role()).await {
        Ok(actions) => {
            let actions: Vec<ActionResponse> = actions.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "actions": actions }))).into_response()
        }
        Err(e) => workflow_error_response(&e),
    }
}

/// GET `/exports/{export_id}/history` - The immutable transition log.
async fn export_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(export_id): Path<Uuid>,
) -> impl IntoResponse {
    let repo = WorkflowRepository::new((*state.db).clone());
    match repo.history_of(export_id).await {
        Ok(events) => {
            let history: Vec<EventResponse> = events.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(json!({ "history": history }))).into_response()
        }
        Err(e) => workflow_error_response(&e),
    }
}

/// GET `/exports/stats` - Export counts by status and stage.
async fn export_stats(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> impl IntoResponse {
    let repo = ExportRepository::new((*state.db).clone());
    match repo.status_stats().await {
        Ok(stats) => {
            let total: u64 = stats.iter().map(|s| s.count).sum();

            let mut by_stage: Vec<(&'static str, u64)> = Vec::new();
            for stat in &stats {
                let name = stat.stage.name();
                match by_stage.iter_mut().find(|(stage, _)| *stage == name) {
                    Some((_, count)) => *count += stat.count,
                    None => by_stage.push((name, stat.count)),
                }
            }

            let by_status: Vec<_> = stats
                .iter()
                .map(|s| {
                    json!({
                        "status": s.status.as_str(),
                        "label": StatusRegistry::definition(s.status).label,
                        "stage": s.stage.name(),
                        "progress": ProgressCalculator::progress_of(s.status),
                        "count": s.count,
                    })
                })
                .collect();

            let by_stage: Vec<_> = by_stage
                .into_iter()
                .map(|(stage, count)| json!({ "stage": stage, "count": count }))
                .collect();

            (
                StatusCode::OK,
                Json(json!({
                    "total": total,
                    "by_status": by_status,
                    "by_stage": by_stage,
                })),
            )
                .into_response()
        }
        Err(e) => app_error_response(&e),
    }
}
