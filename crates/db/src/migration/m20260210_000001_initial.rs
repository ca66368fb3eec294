//! Initial database migration.
//!
//! Creates the exports table and its append-only transition_events child
//! collection. Status values are stored as text and validated against the
//! in-process status registry, not a database enum.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(EXPORTS_SQL).await?;
        db.execute_unprepared(TRANSITION_EVENTS_SQL).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DROP_ALL_SQL).await?;
        Ok(())
    }
}

// ============================================================
// SQL CONSTANTS
// ============================================================

const EXPORTS_SQL: &str = r"
CREATE TABLE exports (
    export_id UUID PRIMARY KEY,
    exporter_id UUID NOT NULL,
    coffee_type VARCHAR(100) NOT NULL,
    quantity_kg NUMERIC(12, 2) NOT NULL,
    value_usd NUMERIC(14, 2) NOT NULL,
    destination_country VARCHAR(100) NOT NULL,
    status VARCHAR(40) NOT NULL,
    version INTEGER NOT NULL DEFAULT 0,
    rejection_reason TEXT,
    rejected_by UUID,
    rejected_at TIMESTAMPTZ,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT chk_exports_version_non_negative CHECK (version >= 0),
    CONSTRAINT chk_exports_quantity_positive CHECK (quantity_kg > 0)
);

CREATE INDEX idx_exports_status ON exports (status);
CREATE INDEX idx_exports_exporter ON exports (exporter_id);
CREATE INDEX idx_exports_created_at ON exports (created_at DESC);
";

const TRANSITION_EVENTS_SQL: &str = r"
CREATE TABLE transition_events (
    id UUID PRIMARY KEY,
    export_id UUID NOT NULL REFERENCES exports (export_id) ON DELETE RESTRICT,
    seq INTEGER NOT NULL,
    from_status VARCHAR(40) NOT NULL,
    to_status VARCHAR(40) NOT NULL,
    actor_role VARCHAR(40) NOT NULL,
    actor_id UUID,
    reason TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),

    CONSTRAINT uq_transition_events_export_seq UNIQUE (export_id, seq),
    CONSTRAINT chk_transition_events_seq_positive CHECK (seq > 0)
);

CREATE INDEX idx_transition_events_export ON transition_events (export_id, seq);
";

const DROP_ALL_SQL: &str = r"
DROP TABLE IF EXISTS transition_events;
DROP TABLE IF EXISTS exports;
";
