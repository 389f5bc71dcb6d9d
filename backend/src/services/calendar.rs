//! Calendar export service for stored plans

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::{calendar_entries, CalendarEntry, CalendarEntryKind, GardenPlan};

use crate::error::{AppError, AppResult};

/// Export format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

/// Query parameters for a calendar export
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CalendarQuery {
    #[serde(default)]
    pub kind: CalendarEntryKind,
    #[serde(default)]
    pub format: ExportFormat,
}

/// Calendar export response
#[derive(Debug, Clone, Serialize)]
pub struct CalendarExport {
    pub plan_id: uuid::Uuid,
    pub kind: CalendarEntryKind,
    pub entries: Vec<CalendarEntry>,
}

/// Flat CSV record for a calendar entry
#[derive(Debug, Serialize)]
struct CalendarCsvRecord<'a> {
    date: NaiveDate,
    kind: CalendarEntryKind,
    crop: &'a str,
    action: String,
    quantity: u32,
    title: &'a str,
}

pub struct CalendarService;

impl CalendarService {
    /// Calendar entries still ahead of `today` for a stored plan
    pub fn export(plan: &GardenPlan, kind: CalendarEntryKind, today: NaiveDate) -> CalendarExport {
        let entries = calendar_entries(&plan.allocation, &plan.catalog, kind, today);
        tracing::debug!(plan_id = %plan.id, entries = entries.len(), "Exported plan calendar");

        CalendarExport {
            plan_id: plan.id,
            kind,
            entries,
        }
    }

    /// Export calendar entries as CSV
    pub fn export_to_csv(entries: &[CalendarEntry]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for entry in entries {
            let record = CalendarCsvRecord {
                date: entry.date,
                kind: entry.kind,
                crop: &entry.crop,
                action: entry.action.to_string(),
                quantity: entry.quantity,
                title: &entry.title,
            };
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use shared::{default_catalog, recalculate, Allocation, CultivationIntensity, PlanParameters};

    fn plan() -> GardenPlan {
        let catalog = default_catalog();
        let mut allocation = Allocation::new();
        allocation.set("Potatis", 10);
        let parameters = PlanParameters::new(2, 20.0, CultivationIntensity::Medium);
        let snapshot = recalculate(&parameters, &allocation, &catalog);
        GardenPlan::from_snapshot(uuid::Uuid::nil(), catalog, snapshot, Utc::now())
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_export_reminders() {
        let export = CalendarService::export(&plan(), CalendarEntryKind::Reminder, date(2025, 6, 1));
        // Potatis harvests in July, August and September
        assert_eq!(export.entries.len(), 3);
        assert_eq!(export.entries[0].date, date(2025, 7, 24));
    }

    #[test]
    fn test_csv_export() {
        let export = CalendarService::export(&plan(), CalendarEntryKind::Event, date(2025, 6, 1));
        let csv = CalendarService::export_to_csv(&export.entries).unwrap();
        let mut lines = csv.lines();

        assert_eq!(lines.next(), Some("date,kind,crop,action,quantity,title"));
        assert_eq!(
            lines.next(),
            Some("2025-07-31,event,Potatis,Harvest,10,Harvest Potatis (10 plants)")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_csv_export_empty() {
        assert_eq!(CalendarService::export_to_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_query_defaults() {
        let query = CalendarQuery::default();
        assert_eq!(query.kind, CalendarEntryKind::Event);
        assert_eq!(query.format, ExportFormat::Json);
    }
}
