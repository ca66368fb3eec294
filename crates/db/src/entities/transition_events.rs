//! `SeaORM` Entity for the transition_events table.
//!
//! Append-only: rows are inserted by the workflow repository and never
//! updated or deleted. `seq` is 1-based and unique per export;
//! `actor_id` is null for system-triggered automatic hops.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "transition_events")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub export_id: Uuid,
    pub seq: i32,
    pub from_status: String,
    pub to_status: String,
    pub actor_role: String,
    pub actor_id: Option<Uuid>,
    pub reason: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::exports::Entity",
        from = "Column::ExportId",
        to = "super::exports::Column::ExportId"
    )]
    Exports,
}

impl Related<super::exports::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Exports.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
