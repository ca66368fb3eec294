//! Core business logic for Cofex.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. The export lifecycle state machine, transition rules,
//! authorization checks, and progress calculation live here.
//!
//! # Modules
//!
//! - `workflow` - Export lifecycle state machine, transition table,
//!   authorization gate, and progress calculation

pub mod workflow;
