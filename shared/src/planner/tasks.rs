//! Monthly task deriver

use super::production::unique_crops;
use crate::models::{Allocation, CropProfile, MonthlyTasks, TaskPriority};
use crate::types::{month_name, MONTHS};

/// Shown for a month that has nothing else scheduled
pub const NO_TASKS_PLACEHOLDER: &str = "No scheduled tasks";

/// Tasks that recur every year regardless of the crop mix
fn seasonal_tasks(month: u32) -> &'static [&'static str] {
    match month {
        1 => &["Plan next season", "Order seeds and plants"],
        3 => &["Prepare soil"],
        5 => &["Active growing months begin"],
        9 => &["Autumn harvest begins"],
        _ => &[],
    }
}

/// Build the twelve-month task calendar for an allocation.
///
/// Always returns January through December, each with at least one task.
/// Crops are visited in catalog order; allocation entries without a catalog
/// profile are ignored. A repeated crop name only counts its first profile.
pub fn derive_monthly_tasks(
    allocation: &Allocation,
    catalog: &[CropProfile],
) -> Vec<MonthlyTasks> {
    let selected: Vec<(&CropProfile, u32)> = unique_crops(catalog)
        .filter_map(|crop| {
            let quantity = allocation.quantity(&crop.name);
            (quantity > 0).then_some((crop, quantity))
        })
        .collect();

    MONTHS
        .map(|month| {
            let mut tasks: Vec<String> = seasonal_tasks(month)
                .iter()
                .map(|task| task.to_string())
                .collect();

            for (crop, quantity) in &selected {
                if crop.is_sown_in(month) {
                    tasks.push(format!("Sow {} ({} plants)", crop.name, quantity));
                }
                if crop.is_harvested_in(month) {
                    tasks.push(format!("Harvest {} ({} plants)", crop.name, quantity));
                }
            }

            if tasks.is_empty() {
                tasks.push(NO_TASKS_PLACEHOLDER.to_string());
            }

            MonthlyTasks {
                month,
                month_name: month_name(month).to_string(),
                priority: TaskPriority::from_task_count(tasks.len()),
                tasks,
            }
        })
        .collect()
}
