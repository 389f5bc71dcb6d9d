//! Plan service for generating, recalculating and storing garden plans
//!
//! Stored plans are immutable JSONB documents. Each row carries a SHA-256
//! checksum of the serialized plan which is verified on every reload.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared::{
    default_catalog, ensure_unique_names, recalculate, recommend_allocation, validate_crop_profile,
    validate_plan_parameters, validate_quantity, Allocation, CatalogError, CatalogOutcome, CatalogSource,
    CropProfile, GardenPlan, PlanParameters, PlanSnapshot,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Plan service for managing garden plans
#[derive(Clone)]
pub struct PlanService {
    db: PgPool,
}

/// Input for generating a recommended plan
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratePlanInput {
    pub parameters: PlanParameters,
    /// Region or climate hint for crop suggestions
    pub region: Option<String>,
    /// Catalog to plan from; when absent one is resolved from the provider
    pub catalog: Option<Vec<CropProfile>>,
}

/// A generated plan together with the catalog it was built from
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPlan {
    #[serde(flatten)]
    pub snapshot: PlanSnapshot,
    pub catalog: Vec<CropProfile>,
    pub catalog_source: CatalogSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Input for a stateless recalculation or for saving a plan
#[derive(Debug, Clone, Deserialize)]
pub struct PlanInput {
    pub parameters: PlanParameters,
    /// Defaults to the standard crop list
    pub catalog: Option<Vec<CropProfile>>,
    #[serde(default)]
    pub allocation: Allocation,
}

/// Stored plan row
#[derive(Debug, sqlx::FromRow)]
struct PlanRow {
    id: Uuid,
    document: sqlx::types::Json<GardenPlan>,
    checksum: String,
}

/// Stored plan summary returned on save
#[derive(Debug, Clone, Serialize)]
pub struct StoredPlan {
    #[serde(flatten)]
    pub plan: GardenPlan,
    pub checksum: String,
}

/// Validate plan parameters at the HTTP boundary
pub fn validate_parameters(parameters: &PlanParameters) -> AppResult<()> {
    parameters
        .validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;
    validate_plan_parameters(parameters).map_err(|e| AppError::ValidationError(e.to_string()))
}

/// Validate a client supplied catalog and allocation
pub fn validate_plan_input(catalog: &[CropProfile], allocation: &Allocation) -> AppResult<()> {
    for crop in catalog {
        validate_crop_profile(crop).map_err(|e| AppError::Validation {
            field: format!("catalog.{}", crop.name),
            message: e.to_string(),
            message_sv: format!("Ogiltig gröda: {}", crop.name),
        })?;
    }
    if let Err(CatalogError::DuplicateCrop(name)) = ensure_unique_names(catalog) {
        return Err(AppError::Validation {
            field: format!("catalog.{}", name),
            message: format!("{} appears more than once in the crop catalog", name),
            message_sv: format!("{} finns flera gånger i grödlistan", name),
        });
    }

    for (name, quantity) in allocation.iter() {
        validate_quantity(quantity).map_err(|e| AppError::Validation {
            field: format!("allocation.{}", name),
            message: e.to_string(),
            message_sv: format!("Ogiltigt antal plantor för {}", name),
        })?;
        if !catalog.iter().any(|c| c.name == name) {
            return Err(AppError::Validation {
                field: format!("allocation.{}", name),
                message: format!("{} is not in the crop catalog", name),
                message_sv: format!("{} finns inte i grödlistan", name),
            });
        }
    }

    Ok(())
}

/// SHA-256 of the serialized plan, base64 encoded
pub fn plan_checksum(plan: &GardenPlan) -> AppResult<String> {
    let bytes = serde_json::to_vec(plan)
        .map_err(|e| AppError::Internal(format!("Plan serialization error: {}", e)))?;
    let digest = Sha256::digest(&bytes);
    Ok(BASE64.encode(digest))
}

/// Recommend an allocation for the parameters and compute its snapshot
pub fn generate_plan(parameters: PlanParameters, outcome: CatalogOutcome) -> AppResult<GeneratedPlan> {
    validate_parameters(&parameters)?;

    let allocation = recommend_allocation(
        &outcome.crops,
        parameters.garden_size_m2,
        parameters.budget_ceiling,
    );
    let snapshot = recalculate(&parameters, &allocation, &outcome.crops);

    tracing::info!(
        household_size = parameters.household_size,
        garden_size_m2 = parameters.garden_size_m2,
        crops = allocation.selected_count(),
        percent = snapshot.self_sufficiency.percent,
        "Generated garden plan"
    );

    Ok(GeneratedPlan {
        snapshot,
        catalog: outcome.crops,
        catalog_source: outcome.source,
        notice: outcome.notice,
    })
}

/// Recompute production, self-sufficiency and tasks for a supplied plan
pub fn recalculate_plan(input: PlanInput) -> AppResult<PlanSnapshot> {
    validate_parameters(&input.parameters)?;
    let catalog = input.catalog.unwrap_or_else(default_catalog);
    validate_plan_input(&catalog, &input.allocation)?;

    Ok(recalculate(&input.parameters, &input.allocation, &catalog))
}

/// Build the immutable plan document for a supplied plan
pub fn build_garden_plan(input: PlanInput, id: Uuid, created_at: DateTime<Utc>) -> AppResult<GardenPlan> {
    validate_parameters(&input.parameters)?;
    let catalog = input.catalog.unwrap_or_else(default_catalog);
    validate_plan_input(&catalog, &input.allocation)?;

    let snapshot = recalculate(&input.parameters, &input.allocation, &catalog);
    Ok(GardenPlan::from_snapshot(id, catalog, snapshot, created_at))
}

/// Verify a reloaded plan against its stored checksum
pub fn verify_plan(plan: &GardenPlan, checksum: &str) -> AppResult<()> {
    if plan_checksum(plan)? != checksum {
        tracing::error!(plan_id = %plan.id, "Stored plan checksum mismatch");
        return Err(AppError::ChecksumMismatch(plan.id));
    }
    Ok(())
}

impl PlanService {
    /// Create a new PlanService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a new plan
    pub async fn save_plan(&self, input: PlanInput) -> AppResult<StoredPlan> {
        let plan = build_garden_plan(input, Uuid::new_v4(), Utc::now())?;
        let checksum = plan_checksum(&plan)?;

        sqlx::query(
            r#"
            INSERT INTO garden_plans (
                id, document, checksum, household_size, garden_size_m2,
                self_sufficiency_percent, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(plan.id)
        .bind(sqlx::types::Json(&plan))
        .bind(&checksum)
        .bind(i32::try_from(plan.parameters.household_size).unwrap_or(i32::MAX))
        .bind(plan.parameters.garden_size_m2)
        .bind(i32::try_from(plan.self_sufficiency_percent).unwrap_or(i32::MAX))
        .bind(plan.created_at)
        .execute(&self.db)
        .await
        .map_err(|e| AppError::StorageError(e.to_string()))?;

        tracing::info!(plan_id = %plan.id, "Stored garden plan");

        Ok(StoredPlan { plan, checksum })
    }

    /// Reload a stored plan, verifying its checksum
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<GardenPlan> {
        let row = sqlx::query_as::<_, PlanRow>(
            r#"
            SELECT id, document, checksum
            FROM garden_plans
            WHERE id = $1
            "#,
        )
        .bind(plan_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Plan".to_string()))?;

        let plan = row.document.0;
        if plan.id != row.id {
            return Err(AppError::ChecksumMismatch(row.id));
        }
        verify_plan(&plan, &row.checksum)?;

        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::CultivationIntensity;

    fn scenario_input() -> PlanInput {
        let mut allocation = Allocation::new();
        allocation.set("Potatis", 10);
        allocation.set("Morötter", 20);
        PlanInput {
            parameters: PlanParameters::new(4, 50.0, CultivationIntensity::Medium),
            catalog: None,
            allocation,
        }
    }

    #[test]
    fn test_recalculate_scenario() {
        let snapshot = recalculate_plan(scenario_input()).unwrap();
        assert_eq!(snapshot.production.calories, 16000.0);
        assert_eq!(snapshot.production.cost, Decimal::from(40));
        assert_eq!(snapshot.self_sufficiency.percent, 1);
        assert_eq!(snapshot.monthly_tasks.len(), 12);
    }

    #[test]
    fn test_recalculate_rejects_unknown_crop() {
        let mut input = scenario_input();
        input.allocation.set("Okänd", 3);
        assert!(matches!(
            recalculate_plan(input),
            Err(AppError::Validation { .. })
        ));
    }

    #[test]
    fn test_repeated_crop_name_rejected() {
        let mut catalog = default_catalog();
        let mut later = catalog[0].clone();
        later.sowing_months = vec![6];
        catalog.push(later);
        let mut input = scenario_input();
        input.catalog = Some(catalog);

        match recalculate_plan(input) {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "catalog.Potatis"),
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_household_rejected_at_boundary() {
        let mut input = scenario_input();
        input.parameters.household_size = 0;
        assert!(matches!(
            recalculate_plan(input),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_generate_plan_keeps_fallback_notice() {
        let parameters = PlanParameters::new(4, 50.0, CultivationIntensity::Medium);
        let generated = generate_plan(parameters, CatalogOutcome::fallback("timeout")).unwrap();

        assert_eq!(generated.catalog_source, CatalogSource::Fallback);
        assert!(generated.notice.is_some());
        assert!(!generated.snapshot.allocation.is_empty());
        assert!(generated.snapshot.production.space_used <= 50.0);
    }

    #[test]
    fn test_checksum_is_stable_and_detects_changes() {
        let plan = build_garden_plan(scenario_input(), Uuid::nil(), Utc::now()).unwrap();
        let checksum = plan_checksum(&plan).unwrap();
        assert_eq!(plan_checksum(&plan).unwrap(), checksum);
        assert!(verify_plan(&plan, &checksum).is_ok());

        let mut tampered = plan.clone();
        tampered.allocation.set("Potatis", 11);
        assert!(matches!(
            verify_plan(&tampered, &checksum),
            Err(AppError::ChecksumMismatch(_))
        ));
    }

    #[test]
    fn test_checksum_survives_json_round_trip() {
        let plan = build_garden_plan(scenario_input(), Uuid::new_v4(), Utc::now()).unwrap();
        let checksum = plan_checksum(&plan).unwrap();

        let value = serde_json::to_value(&plan).unwrap();
        let reloaded: GardenPlan = serde_json::from_value(value).unwrap();
        assert!(verify_plan(&reloaded, &checksum).is_ok());
    }
}
