//! Shared types and planning logic for the Garden Self-Sufficiency Planner
//!
//! This crate contains the allocation and recompute engine and the types
//! shared between the backend, the browser UI (via WASM), and other
//! components of the system. It performs no I/O.

pub mod calendar;
pub mod catalog;
pub mod models;
pub mod planner;
pub mod types;
pub mod validation;

pub use calendar::*;
pub use catalog::*;
pub use models::*;
pub use planner::*;
pub use types::*;
pub use validation::*;
