//! Calendar export HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::services::calendar::{CalendarQuery, CalendarService, ExportFormat};
use crate::services::PlanService;
use crate::AppState;

/// Export the sowing and harvest calendar of a stored plan
pub async fn export_plan_calendar(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
    Query(query): Query<CalendarQuery>,
) -> impl IntoResponse {
    let service = PlanService::new(state.db.clone());

    let plan = match service.get_plan(plan_id).await {
        Ok(plan) => plan,
        Err(e) => return e.into_response(),
    };

    let export = CalendarService::export(&plan, query.kind, Utc::now().date_naive());

    match query.format {
        ExportFormat::Json => (StatusCode::OK, Json(export)).into_response(),
        ExportFormat::Csv => match CalendarService::export_to_csv(&export.entries) {
            Ok(csv) => (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("attachment; filename=\"garden-plan-{}.csv\"", plan_id),
                    ),
                ],
                csv,
            )
                .into_response(),
            Err(e) => e.into_response(),
        },
    }
}
