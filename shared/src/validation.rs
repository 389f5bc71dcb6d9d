//! Validation utilities for planner inputs
//!
//! Core computations never fail; these checks guard the places where data
//! enters a session: provider catalogs, custom crops and user edits.

use rust_decimal::Decimal;

use crate::models::{CropProfile, PlanParameters};
use crate::types::is_valid_month;

// ============================================================================
// Crop Validations
// ============================================================================

/// Largest plant count accepted for a single crop
pub const MAX_QUANTITY: u32 = 10_000;

/// Validate a crop profile before it enters a catalog
pub fn validate_crop_profile(crop: &CropProfile) -> Result<(), &'static str> {
    if crop.name.trim().is_empty() {
        return Err("Crop name is required");
    }
    if crop.name.chars().count() > 80 {
        return Err("Crop name must be at most 80 characters");
    }
    for value in [crop.total_calories, crop.yield_plants, crop.space_required_total] {
        if !value.is_finite() {
            return Err("Numeric values must be finite");
        }
        if value < 0.0 {
            return Err("Numeric values cannot be negative");
        }
    }
    if crop.cost_per_plant < Decimal::ZERO {
        return Err("Cost per plant cannot be negative");
    }
    if !crop
        .sowing_months
        .iter()
        .chain(crop.harvesting_months.iter())
        .all(|m| is_valid_month(*m))
    {
        return Err("Months must be between 1 and 12");
    }
    Ok(())
}

/// Validate a plant quantity entered by the user
pub fn validate_quantity(quantity: u32) -> Result<(), &'static str> {
    if quantity > MAX_QUANTITY {
        return Err("Quantity must be at most 10000 plants");
    }
    Ok(())
}

// ============================================================================
// Plan Parameter Validations
// ============================================================================

/// Validate household size for a new plan (at least one person)
pub fn validate_household_size(household_size: u32) -> Result<(), &'static str> {
    if household_size == 0 {
        return Err("Household must have at least one person");
    }
    if household_size > 50 {
        return Err("Household size must be at most 50");
    }
    Ok(())
}

/// Validate garden area in m²
pub fn validate_garden_size(garden_size_m2: f64) -> Result<(), &'static str> {
    if !garden_size_m2.is_finite() || garden_size_m2 <= 0.0 {
        return Err("Garden size must be greater than 0 m²");
    }
    if garden_size_m2 > 100_000.0 {
        return Err("Garden size must be at most 100000 m²");
    }
    Ok(())
}

/// Validate an optional budget ceiling
pub fn validate_budget(budget_ceiling: Option<Decimal>) -> Result<(), &'static str> {
    match budget_ceiling {
        Some(budget) if budget < Decimal::ZERO => Err("Budget cannot be negative"),
        _ => Ok(()),
    }
}

/// Validate parameters submitted for a new or saved plan
pub fn validate_plan_parameters(parameters: &PlanParameters) -> Result<(), &'static str> {
    validate_household_size(parameters.household_size)?;
    validate_garden_size(parameters.garden_size_m2)?;
    validate_budget(parameters.budget_ceiling)?;
    Ok(())
}
