//! Crop profile models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A crop as described by a catalog
///
/// Calorie and space figures are totals measured over `yield_plants` plants.
/// Per-plant values are always derived through [`CropProfile::calories_per_plant`]
/// and [`CropProfile::space_per_plant`] so a zero or missing yield never
/// produces NaN or infinity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropProfile {
    pub name: String,
    /// Total calories produced by `yield_plants` plants
    pub total_calories: f64,
    /// Number of plants the totals are measured over
    #[serde(rename = "yield")]
    pub yield_plants: f64,
    /// Total growing area in m² for `yield_plants` plants
    pub space_required_total: f64,
    pub cost_per_plant: Decimal,
    /// Months (1-12) in which the crop is sown
    pub sowing_months: Vec<u32>,
    /// Months (1-12) in which the crop is harvested
    pub harvesting_months: Vec<u32>,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl CropProfile {
    /// Yield used for per-plant derivations, never below one plant
    pub fn effective_yield(&self) -> f64 {
        if self.yield_plants.is_finite() {
            self.yield_plants.max(1.0)
        } else {
            1.0
        }
    }

    pub fn calories_per_plant(&self) -> f64 {
        finite_or_zero(self.total_calories) / self.effective_yield()
    }

    pub fn space_per_plant(&self) -> f64 {
        finite_or_zero(self.space_required_total) / self.effective_yield()
    }

    /// Calorie density used to rank crops during recommendation.
    /// Crops without a space footprint rank last.
    pub fn calories_per_m2(&self) -> f64 {
        let space = self.space_per_plant();
        if space > 0.0 {
            self.calories_per_plant() / space
        } else {
            0.0
        }
    }

    pub fn is_sown_in(&self, month: u32) -> bool {
        self.sowing_months.contains(&month)
    }

    pub fn is_harvested_in(&self, month: u32) -> bool {
        self.harvesting_months.contains(&month)
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Growing difficulty of a crop
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" | "easy" | "nybörjare" | "lätt" => Ok(Difficulty::Beginner),
            "intermediate" | "medium" | "medel" => Ok(Difficulty::Intermediate),
            "advanced" | "hard" | "avancerad" | "svår" => Ok(Difficulty::Advanced),
            _ => Err("Unknown difficulty"),
        }
    }
}
