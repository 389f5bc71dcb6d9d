//! Calendar and reminder export
//!
//! Projects the sowing and harvesting months of the selected crops onto dated
//! entries for an external calendar. Only months still ahead of `today` in the
//! current year are exported, and no entry is dated on or before `today`. The
//! plan itself is never modified.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::{Allocation, CropProfile};
use crate::planner::unique_crops;
use crate::types::last_day_of_month;

/// Days between a reminder and the end of its month
pub const REMINDER_LEAD_DAYS: u64 = 7;

/// Whether entries are dated events or advance reminders
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CalendarEntryKind {
    /// Dated to the last day of the month
    #[default]
    Event,
    /// Dated seven days before the last day of the month
    Reminder,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GardenAction {
    Sow,
    Harvest,
}

impl std::fmt::Display for GardenAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GardenAction::Sow => write!(f, "Sow"),
            GardenAction::Harvest => write!(f, "Harvest"),
        }
    }
}

/// A single exported calendar entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalendarEntry {
    pub date: NaiveDate,
    pub kind: CalendarEntryKind,
    pub crop: String,
    pub action: GardenAction,
    pub quantity: u32,
    pub title: String,
}

/// Calendar entries for the selected crops, ordered by date
pub fn calendar_entries(
    allocation: &Allocation,
    catalog: &[CropProfile],
    kind: CalendarEntryKind,
    today: NaiveDate,
) -> Vec<CalendarEntry> {
    let year = today.year();
    let mut entries = Vec::new();

    for crop in unique_crops(catalog) {
        let quantity = allocation.quantity(&crop.name);
        if quantity == 0 {
            continue;
        }

        let actions = crop
            .sowing_months
            .iter()
            .map(|m| (GardenAction::Sow, *m))
            .chain(crop.harvesting_months.iter().map(|m| (GardenAction::Harvest, *m)));

        for (action, month) in actions {
            let Some(month_end) = last_day_of_month(year, month) else {
                continue;
            };
            if month_end <= today {
                continue;
            }
            let date = match kind {
                CalendarEntryKind::Event => month_end,
                CalendarEntryKind::Reminder => month_end
                    .checked_sub_days(Days::new(REMINDER_LEAD_DAYS))
                    .unwrap_or(month_end),
            };
            // A reminder for the current month may already be behind us
            if date <= today {
                continue;
            }

            entries.push(CalendarEntry {
                date,
                kind,
                crop: crop.name.clone(),
                action,
                quantity,
                title: format!("{} {} ({} plants)", action, crop.name, quantity),
            });
        }
    }

    entries.sort_by_key(|entry| entry.date);
    entries
}
