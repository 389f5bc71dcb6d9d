//! Domain models for the Garden Self-Sufficiency Planner

mod crop;
mod plan;
mod task;

pub use crop::*;
pub use plan::*;
pub use task::*;
