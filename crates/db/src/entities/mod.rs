//! `SeaORM` entity definitions.

pub mod exports;
pub mod transition_events;
