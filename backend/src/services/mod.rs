//! Business logic services for the Garden Self-Sufficiency Planner

pub mod calendar;
pub mod catalog;
pub mod plan;

pub use calendar::CalendarService;
pub use catalog::CatalogService;
pub use plan::PlanService;
