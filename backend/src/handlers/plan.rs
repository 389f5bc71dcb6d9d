//! Garden plan HTTP handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use shared::CatalogOutcome;
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::catalog::SuggestCropsInput;
use crate::services::plan::{self, GeneratePlanInput, GeneratedPlan, PlanInput, PlanService};
use crate::AppState;

/// Generate a recommended plan, resolving a catalog when none is supplied
pub async fn generate_plan(
    State(state): State<AppState>,
    Json(input): Json<GeneratePlanInput>,
) -> AppResult<Json<GeneratedPlan>> {
    plan::validate_parameters(&input.parameters)?;

    let outcome = match input.catalog {
        Some(crops) => {
            plan::validate_plan_input(&crops, &Default::default())?;
            CatalogOutcome::generated(crops)
        }
        None => {
            state
                .catalog
                .suggest(SuggestCropsInput {
                    household_size: input.parameters.household_size,
                    garden_size_m2: input.parameters.garden_size_m2,
                    intensity: input.parameters.intensity,
                    region: input.region,
                })
                .await
        }
    };

    Ok(Json(plan::generate_plan(input.parameters, outcome)?))
}

/// Recompute a plan without storing it
pub async fn recalculate_plan(Json(input): Json<PlanInput>) -> impl IntoResponse {
    match plan::recalculate_plan(input) {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Store a plan as an immutable document
pub async fn save_plan(
    State(state): State<AppState>,
    Json(input): Json<PlanInput>,
) -> impl IntoResponse {
    let service = PlanService::new(state.db.clone());

    match service.save_plan(input).await {
        Ok(stored) => (StatusCode::CREATED, Json(stored)).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Reload a stored plan
pub async fn get_plan(
    State(state): State<AppState>,
    Path(plan_id): Path<Uuid>,
) -> impl IntoResponse {
    let service = PlanService::new(state.db.clone());

    match service.get_plan(plan_id).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => e.into_response(),
    }
}
