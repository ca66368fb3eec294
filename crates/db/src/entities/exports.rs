//! `SeaORM` Entity for the exports table.
//!
//! The `status` column holds the wire form of a registered status and is
//! parsed through the status registry at the repository boundary; the
//! `version` column backs the optimistic concurrency check.

use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "exports")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub export_id: Uuid,
    pub exporter_id: Uuid,
    pub coffee_type: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub quantity_kg: Decimal,
    #[sea_orm(column_type = "Decimal(Some((14, 2)))")]
    pub value_usd: Decimal,
    pub destination_country: String,
    pub status: String,
    pub version: i32,
    pub rejection_reason: Option<String>,
    pub rejected_by: Option<Uuid>,
    pub rejected_at: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::transition_events::Entity")]
    TransitionEvents,
}

impl Related<super::transition_events::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TransitionEvents.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
