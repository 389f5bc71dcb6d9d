//! Crop catalog HTTP handlers

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use shared::validate_household_size;

use crate::error::AppError;
use crate::services::catalog::SuggestCropsInput;
use crate::AppState;

/// The standard crop list
pub async fn get_default_crops(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({ "crops": state.catalog.default_crops() }))
}

/// Crop suggestions for a household. Provider failures yield the standard list.
pub async fn suggest_crops(
    State(state): State<AppState>,
    Json(input): Json<SuggestCropsInput>,
) -> impl IntoResponse {
    if let Err(e) = validate_household_size(input.household_size) {
        return AppError::Validation {
            field: "household_size".to_string(),
            message: e.to_string(),
            message_sv: "Hushållet måste ha mellan 1 och 50 personer".to_string(),
        }
        .into_response();
    }

    let outcome = state.catalog.suggest(input).await;
    (StatusCode::OK, Json(outcome)).into_response()
}
