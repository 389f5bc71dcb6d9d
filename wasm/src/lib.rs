//! WebAssembly module for the Garden Self-Sufficiency Planner
//!
//! Gives both browser surfaces (the planner page and the quick calculator
//! widget) the same engine:
//! - Production and self-sufficiency calculations
//! - Initial crop recommendations
//! - Monthly task calendars
//! - A live planning session that recomputes on every input change

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::catalog::*;
pub use shared::models::*;
pub use shared::planner::*;

fn log_notice(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&JsValue::from_str(message));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&format!("Serialization failed: {}", e)))
}

fn intensity_from(intensity: &str) -> Result<CultivationIntensity, String> {
    intensity
        .parse()
        .map_err(|e| format!("{}: {:?}", e, intensity))
}

fn parse_intensity(intensity: &str) -> Result<CultivationIntensity, JsValue> {
    intensity_from(intensity).map_err(|e| JsValue::from_str(&e))
}

/// Catalogs from JavaScript must not repeat a crop name
fn unique_catalog(catalog: Vec<CropProfile>) -> Result<Vec<CropProfile>, String> {
    ensure_unique_names(&catalog).map_err(|e| e.to_string())?;
    Ok(catalog)
}

fn parse_catalog(json: &str) -> Result<Vec<CropProfile>, JsValue> {
    unique_catalog(parse_json(json, "catalog")?).map_err(|e| JsValue::from_str(&e))
}

fn budget_from(budget: Option<f64>) -> Option<Decimal> {
    budget.and_then(|b| Decimal::try_from(b).ok())
}

/// Standard crop catalog as JSON
#[wasm_bindgen]
pub fn default_catalog_json() -> String {
    serde_json::to_string(&default_catalog()).unwrap_or_else(|_| "[]".to_string())
}

/// Parse a provider response, falling back to the standard catalog.
/// Returns a `CatalogOutcome` as JSON.
#[wasm_bindgen]
pub fn resolve_catalog_json(body: &str) -> String {
    let outcome = resolve_catalog::<&str>(Ok(body));
    if let Some(notice) = &outcome.notice {
        log_notice(notice);
    }
    serde_json::to_string(&outcome).unwrap_or_else(|_| "{}".to_string())
}

/// Calculate calories, cost and space for an allocation
#[wasm_bindgen]
pub fn calculate_production(
    allocation_json: &str,
    catalog_json: &str,
    intensity: &str,
) -> Result<String, JsValue> {
    let allocation: Allocation = parse_json(allocation_json, "allocation")?;
    let catalog = parse_catalog(catalog_json)?;
    to_json(&compute_production(&allocation, &catalog, parse_intensity(intensity)?))
}

/// Self-sufficiency percent (unclamped) for a yearly calorie production
#[wasm_bindgen]
pub fn calculate_self_sufficiency_percent(calories: f64, household_size: u32) -> u32 {
    let production = ProductionResult {
        calories,
        ..Default::default()
    };
    evaluate_self_sufficiency(&production, household_size).percent
}

/// Calories still to be bought for a yearly calorie production
#[wasm_bindgen]
pub fn calculate_grocery_calories(calories: f64, household_size: u32) -> f64 {
    let production = ProductionResult {
        calories,
        ..Default::default()
    };
    evaluate_self_sufficiency(&production, household_size).grocery_calories
}

/// Recommended starting allocation as JSON
#[wasm_bindgen]
pub fn recommend_allocation_json(
    catalog_json: &str,
    garden_size_m2: f64,
    budget_ceiling: Option<f64>,
) -> Result<String, JsValue> {
    let catalog = parse_catalog(catalog_json)?;
    to_json(&recommend_allocation(&catalog, garden_size_m2, budget_from(budget_ceiling)))
}

/// Default plant count used when a crop is checked in the UI
#[wasm_bindgen]
pub fn default_quantity_for(crop_name: &str, garden_size_m2: f64) -> u32 {
    default_quantity(crop_name, garden_size_m2)
}

/// Twelve-month task calendar as JSON
#[wasm_bindgen]
pub fn monthly_tasks_json(allocation_json: &str, catalog_json: &str) -> Result<String, JsValue> {
    let allocation: Allocation = parse_json(allocation_json, "allocation")?;
    let catalog = parse_catalog(catalog_json)?;
    to_json(&derive_monthly_tasks(&allocation, &catalog))
}

/// Live planning session for the planner page
#[wasm_bindgen]
pub struct PlannerSession {
    inner: PlanningSession,
}

#[wasm_bindgen]
impl PlannerSession {
    /// Start a session from a catalog and parameters. When `recommend` is set
    /// the allocation starts from the recommender's proposal.
    #[wasm_bindgen(constructor)]
    pub fn new(
        catalog_json: &str,
        parameters_json: &str,
        recommend: bool,
    ) -> Result<PlannerSession, JsValue> {
        let catalog = parse_catalog(catalog_json)?;
        let parameters: PlanParameters = parse_json(parameters_json, "parameters")?;
        let inner = if recommend {
            PlanningSession::recommended(catalog, parameters)
        } else {
            PlanningSession::new(catalog, parameters)
        };
        Ok(PlannerSession { inner })
    }

    /// Restore a session from a saved plan document
    pub fn from_plan(plan_json: &str) -> Result<PlannerSession, JsValue> {
        let plan: GardenPlan = parse_json(plan_json, "plan")?;
        Ok(PlannerSession {
            inner: PlanningSession::from_garden_plan(plan),
        })
    }

    pub fn set_household_size(&mut self, household_size: u32) -> bool {
        self.inner.set_household_size(household_size)
    }

    pub fn set_garden_size(&mut self, garden_size_m2: f64) -> Result<bool, JsValue> {
        self.inner
            .set_garden_size(garden_size_m2)
            .map_err(JsValue::from_str)
    }

    pub fn set_intensity(&mut self, intensity: &str) -> Result<bool, JsValue> {
        Ok(self.inner.set_intensity(parse_intensity(intensity)?))
    }

    pub fn set_budget_ceiling(&mut self, budget_ceiling: Option<f64>) {
        self.inner.set_budget_ceiling(budget_from(budget_ceiling));
    }

    pub fn set_quantity(&mut self, crop: &str, quantity: u32) -> Result<bool, JsValue> {
        self.inner
            .set_quantity(crop, quantity)
            .map_err(JsValue::from_str)
    }

    pub fn toggle_crop(&mut self, crop: &str, selected: bool) -> Result<bool, JsValue> {
        self.inner
            .toggle_crop(crop, selected)
            .map_err(JsValue::from_str)
    }

    pub fn add_custom_crop(&mut self, crop_json: &str) -> Result<(), JsValue> {
        let crop: CropProfile = parse_json(crop_json, "crop")?;
        self.inner
            .add_custom_crop(crop)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Replace the allocation with a fresh recommendation ("generate new plan")
    pub fn apply_recommendation(&mut self) -> Result<String, JsValue> {
        to_json(self.inner.apply_recommendation())
    }

    pub fn user_modified(&self) -> bool {
        self.inner.user_modified()
    }

    /// Latest plan snapshot as JSON
    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        to_json(self.inner.snapshot())
    }

    pub fn catalog_json(&self) -> Result<String, JsValue> {
        to_json(&self.inner.catalog())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_json_round_trips() {
        let catalog: Vec<CropProfile> = serde_json::from_str(&default_catalog_json()).unwrap();
        assert_eq!(catalog, default_catalog());
    }

    #[test]
    fn test_calculate_production() {
        let result = calculate_production(
            r#"{"Potatis": 10, "Morötter": 20}"#,
            &default_catalog_json(),
            "medium",
        )
        .unwrap();
        let production: ProductionResult = serde_json::from_str(&result).unwrap();
        assert_eq!(production.calories, 16000.0);
        assert_eq!(production.cost, Decimal::from(40));
    }

    #[test]
    fn test_self_sufficiency_percent() {
        assert_eq!(calculate_self_sufficiency_percent(16000.0, 4), 1);
        assert_eq!(calculate_self_sufficiency_percent(16000.0, 0), 0);
        assert_eq!(calculate_grocery_calories(16000.0, 4), 2_904_000.0);
    }

    #[test]
    fn test_default_quantity_matches_engine() {
        assert_eq!(default_quantity_for("Potatis", 20.0), default_quantity("Potatis", 20.0));
        assert_eq!(default_quantity_for("Okänd", 20.0), 4);
    }

    #[test]
    fn test_monthly_tasks_json() {
        let json = monthly_tasks_json("{}", &default_catalog_json()).unwrap();
        let tasks: Vec<MonthlyTasks> = serde_json::from_str(&json).unwrap();
        assert_eq!(tasks.len(), 12);
    }

    #[test]
    fn test_resolve_catalog_fallback() {
        let outcome: CatalogOutcome =
            serde_json::from_str(&resolve_catalog_json("oops")).unwrap();
        assert!(outcome.is_fallback());
    }

    #[test]
    fn test_intensity_names() {
        assert_eq!(intensity_from("High"), Ok(CultivationIntensity::High));
        assert_eq!(intensity_from("låg"), Ok(CultivationIntensity::Low));
        assert!(intensity_from("hgh").unwrap_err().contains("hgh"));
    }

    #[test]
    fn test_repeated_crop_name_rejected() {
        let mut catalog = default_catalog();
        let mut later = catalog[0].clone();
        later.sowing_months = vec![6];
        catalog.push(later);

        assert!(unique_catalog(catalog).unwrap_err().contains("Potatis"));
        assert_eq!(unique_catalog(default_catalog()).unwrap(), default_catalog());
    }

    #[test]
    fn test_session_recomputes() {
        let mut session = PlannerSession::new(
            &default_catalog_json(),
            r#"{"household_size": 4, "garden_size_m2": 50.0, "intensity": "high"}"#,
            false,
        )
        .unwrap();
        assert!(session.set_quantity("Potatis", 10).unwrap());
        assert!(session.set_quantity("Morötter", 20).unwrap());

        let snapshot: PlanSnapshot = serde_json::from_str(&session.snapshot_json().unwrap()).unwrap();
        assert!((snapshot.production.calories - 20800.0).abs() < 1e-9);
        assert!(session.user_modified());

        assert!(session.set_intensity("medium").unwrap());
        let snapshot: PlanSnapshot = serde_json::from_str(&session.snapshot_json().unwrap()).unwrap();
        assert_eq!(snapshot.production.calories, 16000.0);
    }
}
