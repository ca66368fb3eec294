//! Export record repository: creation and read paths.
//!
//! Status mutation is deliberately absent here; only the workflow
//! repository moves an export through its lifecycle.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

use cofex_core::workflow::types::{ExportStatus, Stage};
use cofex_core::workflow::StatusRegistry;
use cofex_shared::types::PageRequest;
use cofex_shared::{AppError, AppResult};

use crate::entities::exports;

/// Input for creating an export record.
#[derive(Debug, Clone)]
pub struct CreateExportInput {
    /// The exporting business.
    pub exporter_id: Uuid,
    /// Coffee variety (opaque to the workflow engine).
    pub coffee_type: String,
    /// Quantity in kilograms.
    pub quantity_kg: Decimal,
    /// Declared value in USD.
    pub value_usd: Decimal,
    /// Destination country.
    pub destination_country: String,
    /// Create as `DRAFT` instead of `PENDING`.
    pub as_draft: bool,
}

/// Filter for listing exports.
#[derive(Debug, Clone, Default)]
pub struct ExportFilter {
    /// Filter by current status.
    pub status: Option<ExportStatus>,
    /// Filter by exporter.
    pub exporter_id: Option<Uuid>,
}

/// Count of exports holding one status.
#[derive(Debug, Clone)]
pub struct StatusCount {
    /// The status.
    pub status: ExportStatus,
    /// Stage the status belongs to.
    pub stage: Stage,
    /// Number of exports currently in the status.
    pub count: u64,
}

/// Repository for export records.
#[derive(Debug, Clone)]
pub struct ExportRepository {
    db: DatabaseConnection,
}

impl ExportRepository {
    /// Creates a new export repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an export record in its initial status.
    ///
    /// # Errors
    ///
    /// Returns an error if validation or the database operation fails.
    pub async fn create_export(&self, input: CreateExportInput) -> AppResult<exports::Model> {
        if input.coffee_type.trim().is_empty() {
            return Err(AppError::Validation("coffee_type is required".to_string()));
        }
        if input.quantity_kg <= Decimal::ZERO {
            return Err(AppError::Validation(
                "quantity_kg must be positive".to_string(),
            ));
        }

        let initial = if input.as_draft {
            ExportStatus::Draft
        } else {
            ExportStatus::Pending
        };

        let now = Utc::now().into();
        let model = exports::ActiveModel {
            export_id: Set(Uuid::new_v4()),
            exporter_id: Set(input.exporter_id),
            coffee_type: Set(input.coffee_type),
            quantity_kg: Set(input.quantity_kg),
            value_usd: Set(input.value_usd),
            destination_country: Set(input.destination_country),
            status: Set(initial.as_str().to_string()),
            version: Set(0),
            rejection_reason: Set(None),
            rejected_by: Set(None),
            rejected_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        model
            .insert(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Fetches an export by ID.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no such export exists.
    pub async fn get_export(&self, export_id: Uuid) -> AppResult<exports::Model> {
        exports::Entity::find_by_id(export_id)
            .one(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?
            .ok_or_else(|| AppError::NotFound(format!("export {export_id}")))
    }

    /// Lists exports with filters and pagination, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_exports(
        &self,
        filter: ExportFilter,
        page: &PageRequest,
    ) -> AppResult<(Vec<exports::Model>, u64)> {
        let mut query = exports::Entity::find();

        if let Some(status) = filter.status {
            query = query.filter(exports::Column::Status.eq(status.as_str()));
        }
        if let Some(exporter_id) = filter.exporter_id {
            query = query.filter(exports::Column::ExporterId.eq(exporter_id));
        }

        let paginator = query
            .order_by_desc(exports::Column::CreatedAt)
            .paginate(&self.db, page.limit().max(1));

        let total = paginator
            .num_items()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        let items = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok((items, total))
    }

    /// Counts exports grouped by current status.
    ///
    /// Statuses with no exports are omitted; an unregistered status in
    /// storage is surfaced as an internal error, never skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored status
    /// is not registered.
    pub async fn status_stats(&self) -> AppResult<Vec<StatusCount>> {
        let rows: Vec<(String, i64)> = exports::Entity::find()
            .select_only()
            .column(exports::Column::Status)
            .column_as(exports::Column::ExportId.count(), "count")
            .group_by(exports::Column::Status)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut stats = Vec::with_capacity(rows.len());
        for (raw, count) in rows {
            let def = StatusRegistry::lookup(&raw)
                .map_err(|e| AppError::Internal(e.to_string()))?;
            stats.push(StatusCount {
                status: def.status,
                stage: def.stage,
                count: count.unsigned_abs(),
            });
        }

        stats.sort_by_key(|s| StatusRegistry::definition(s.status).progress_weight);
        Ok(stats)
    }
}
