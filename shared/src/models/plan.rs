//! Planning parameters, allocations and plan documents

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{CropProfile, MonthlyTasks};

/// Daily calorie need per person used for annual household need
pub const DAILY_CALORIES_PER_PERSON: f64 = 2000.0;

/// Days per year used for annual household need
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Care-level multiplier applied to calorie yield only
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CultivationIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl CultivationIntensity {
    pub fn multiplier(&self) -> f64 {
        match self {
            CultivationIntensity::Low => 0.8,
            CultivationIntensity::Medium => 1.0,
            CultivationIntensity::High => 1.3,
        }
    }
}

impl std::fmt::Display for CultivationIntensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CultivationIntensity::Low => write!(f, "Low"),
            CultivationIntensity::Medium => write!(f, "Medium"),
            CultivationIntensity::High => write!(f, "High"),
        }
    }
}

impl std::str::FromStr for CultivationIntensity {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" | "låg" => Ok(CultivationIntensity::Low),
            "medium" | "medel" => Ok(CultivationIntensity::Medium),
            "high" | "hög" => Ok(CultivationIntensity::High),
            _ => Err("Unknown cultivation intensity"),
        }
    }
}

/// Household and garden inputs for a planning session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct PlanParameters {
    #[validate(range(max = 50))]
    pub household_size: u32,
    #[validate(range(min = 0.01, max = 100000.0))]
    pub garden_size_m2: f64,
    #[serde(default)]
    pub intensity: CultivationIntensity,
    /// Spending cap, read only by the recommender
    #[serde(default)]
    pub budget_ceiling: Option<Decimal>,
}

impl PlanParameters {
    pub fn new(household_size: u32, garden_size_m2: f64, intensity: CultivationIntensity) -> Self {
        Self {
            household_size,
            garden_size_m2,
            intensity,
            budget_ceiling: None,
        }
    }

    pub fn with_budget(mut self, budget_ceiling: Decimal) -> Self {
        self.budget_ceiling = Some(budget_ceiling);
        self
    }

    /// Annual calorie need of the household
    pub fn annual_need(&self) -> f64 {
        f64::from(self.household_size) * DAILY_CALORIES_PER_PERSON * DAYS_PER_YEAR
    }
}

/// Crop name to plant quantity. Absent crops have quantity zero.
///
/// Backed by an ordered map so iteration, and therefore every summed
/// result, is identical across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Allocation(BTreeMap<String, u32>);

impl Allocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, crop: &str) -> u32 {
        self.0.get(crop).copied().unwrap_or(0)
    }

    /// Set a crop's quantity. A quantity of zero deselects the crop.
    pub fn set(&mut self, crop: impl Into<String>, quantity: u32) {
        let crop = crop.into();
        if quantity == 0 {
            self.0.remove(&crop);
        } else {
            self.0.insert(crop, quantity);
        }
    }

    pub fn remove(&mut self, crop: &str) -> Option<u32> {
        self.0.remove(crop)
    }

    pub fn is_selected(&self, crop: &str) -> bool {
        self.quantity(crop) > 0
    }

    /// Selected crops in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0
            .iter()
            .filter(|(_, quantity)| **quantity > 0)
            .map(|(name, quantity)| (name.as_str(), *quantity))
    }

    pub fn selected_count(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_count() == 0
    }
}

impl FromIterator<(String, u32)> for Allocation {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut allocation = Allocation::new();
        for (crop, quantity) in iter {
            allocation.set(crop, quantity);
        }
        allocation
    }
}

/// Aggregate production of an allocation
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductionResult {
    pub calories: f64,
    pub cost: Decimal,
    pub space_used: f64,
}

/// Share of household need met by the garden
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SelfSufficiency {
    /// Rounded percent, not clamped to 100
    pub percent: u32,
    /// Calories still to be bought
    pub grocery_calories: f64,
    pub annual_need: f64,
}

impl SelfSufficiency {
    /// Percent capped at 100 for display
    pub fn display_percent(&self) -> u32 {
        self.percent.min(100)
    }
}

/// Result of one pass of the recalculation loop
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanSnapshot {
    pub parameters: PlanParameters,
    pub allocation: Allocation,
    pub production: ProductionResult,
    pub self_sufficiency: SelfSufficiency,
    pub monthly_tasks: Vec<MonthlyTasks>,
}

/// Persisted plan document. Never mutated once stored; a reload replaces it whole.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GardenPlan {
    pub id: Uuid,
    pub parameters: PlanParameters,
    pub catalog: Vec<CropProfile>,
    pub allocation: Allocation,
    pub production_result: ProductionResult,
    pub self_sufficiency_percent: u32,
    pub grocery_calories: f64,
    pub monthly_tasks: Vec<MonthlyTasks>,
    pub created_at: DateTime<Utc>,
}

impl GardenPlan {
    pub fn from_snapshot(
        id: Uuid,
        catalog: Vec<CropProfile>,
        snapshot: PlanSnapshot,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            parameters: snapshot.parameters,
            catalog,
            allocation: snapshot.allocation,
            production_result: snapshot.production,
            self_sufficiency_percent: snapshot.self_sufficiency.percent,
            grocery_calories: snapshot.self_sufficiency.grocery_calories,
            monthly_tasks: snapshot.monthly_tasks,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_multipliers() {
        assert_eq!(CultivationIntensity::Low.multiplier(), 0.8);
        assert_eq!(CultivationIntensity::Medium.multiplier(), 1.0);
        assert_eq!(CultivationIntensity::High.multiplier(), 1.3);
    }

    #[test]
    fn test_intensity_parsing() {
        assert_eq!("high".parse::<CultivationIntensity>(), Ok(CultivationIntensity::High));
        assert_eq!(" Low ".parse::<CultivationIntensity>(), Ok(CultivationIntensity::Low));
        assert_eq!(
            "extreme".parse::<CultivationIntensity>(),
            Err("Unknown cultivation intensity")
        );
    }

    #[test]
    fn test_annual_need() {
        let params = PlanParameters::new(4, 50.0, CultivationIntensity::Medium);
        assert_eq!(params.annual_need(), 2_920_000.0);
    }

    #[test]
    fn test_allocation_zero_deselects() {
        let mut allocation = Allocation::new();
        allocation.set("Potatis", 10);
        assert!(allocation.is_selected("Potatis"));

        allocation.set("Potatis", 0);
        assert!(!allocation.is_selected("Potatis"));
        assert!(allocation.is_empty());
        assert_eq!(allocation.quantity("Morötter"), 0);
    }

    #[test]
    fn test_allocation_serializes_as_map() {
        let allocation: Allocation = vec![("Potatis".to_string(), 10), ("Lök".to_string(), 5)]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&allocation).unwrap();
        assert_eq!(json, serde_json::json!({ "Lök": 5, "Potatis": 10 }));
    }

    #[test]
    fn test_parameters_validation() {
        let valid = PlanParameters::new(4, 50.0, CultivationIntensity::High);
        assert!(valid.validate().is_ok());

        let no_garden = PlanParameters::new(4, 0.0, CultivationIntensity::High);
        assert!(no_garden.validate().is_err());

        let huge_household = PlanParameters::new(500, 50.0, CultivationIntensity::Low);
        assert!(huge_household.validate().is_err());
    }

    #[test]
    fn test_display_percent_clamped() {
        let sufficiency = SelfSufficiency {
            percent: 140,
            grocery_calories: 0.0,
            annual_need: 730_000.0,
        };
        assert_eq!(sufficiency.display_percent(), 100);
    }
}
