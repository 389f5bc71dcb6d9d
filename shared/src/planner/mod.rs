//! Allocation and recompute engine
//!
//! Pure functions for production, self-sufficiency, recommendation and the
//! monthly task calendar, plus [`PlanningSession`] which re-runs them when a
//! watched input changes.

mod production;
mod quantity;
mod recommend;
mod session;
mod sufficiency;
mod tasks;

pub use production::*;
pub use quantity::*;
pub use recommend::*;
pub use session::*;
pub use sufficiency::*;
pub use tasks::*;

use crate::models::{Allocation, CropProfile, PlanParameters, PlanSnapshot};

/// One full recompute pass: production, then self-sufficiency, then tasks
pub fn recalculate(
    parameters: &PlanParameters,
    allocation: &Allocation,
    catalog: &[CropProfile],
) -> PlanSnapshot {
    let production = compute_production(allocation, catalog, parameters.intensity);
    let self_sufficiency = evaluate_self_sufficiency(&production, parameters.household_size);
    let monthly_tasks = derive_monthly_tasks(allocation, catalog);

    PlanSnapshot {
        parameters: parameters.clone(),
        allocation: allocation.clone(),
        production,
        self_sufficiency,
        monthly_tasks,
    }
}
