//! HTTP handlers for the Garden Self-Sufficiency Planner

pub mod calendar;
pub mod catalog;
pub mod health;
pub mod plan;

pub use calendar::export_plan_calendar;
pub use catalog::{get_default_crops, suggest_crops};
pub use health::health_check;
pub use plan::{generate_plan, get_plan, recalculate_plan, save_plan};
