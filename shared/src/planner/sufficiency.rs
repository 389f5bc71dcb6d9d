//! Self-sufficiency evaluation against household calorie need

use crate::models::{
    PlanParameters, ProductionResult, SelfSufficiency, DAILY_CALORIES_PER_PERSON, DAYS_PER_YEAR,
};

/// Share of annual household need covered by production.
///
/// The percent is rounded but not clamped. A household of zero yields 0%.
pub fn evaluate_self_sufficiency(
    production: &ProductionResult,
    household_size: u32,
) -> SelfSufficiency {
    let annual_need = f64::from(household_size) * DAILY_CALORIES_PER_PERSON * DAYS_PER_YEAR;
    let calories = if production.calories.is_finite() {
        production.calories.max(0.0)
    } else {
        0.0
    };

    let percent = if annual_need > 0.0 {
        (calories / annual_need * 100.0).round() as u32
    } else {
        0
    };

    SelfSufficiency {
        percent,
        grocery_calories: (annual_need - calories).max(0.0),
        annual_need,
    }
}

/// Evaluate using the household size of a parameter set
pub fn evaluate_for(production: &ProductionResult, parameters: &PlanParameters) -> SelfSufficiency {
    evaluate_self_sufficiency(production, parameters.household_size)
}
