//! Production and self-sufficiency tests
//!
//! Property-based and unit tests for:
//! - Property 1: Space Used Is Exact
//! - Property 2: Self-Sufficiency Is Monotonic In Quantity
//! - Property 5: Recalculation Is Idempotent
//! - Property 6: Zero Household And Empty Allocation
//! - Scenarios: Potatis and Morötter at medium and high intensity

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    compute_production, default_catalog, evaluate_self_sufficiency, recalculate, Allocation,
    CropProfile, CultivationIntensity, Difficulty, PlanParameters,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn intensity_strategy() -> impl Strategy<Value = CultivationIntensity> {
    prop_oneof![
        Just(CultivationIntensity::Low),
        Just(CultivationIntensity::Medium),
        Just(CultivationIntensity::High),
    ]
}

/// Allocations over the standard crop list, some crops left out
fn allocation_strategy() -> impl Strategy<Value = Allocation> {
    let names: Vec<String> = default_catalog().into_iter().map(|c| c.name).collect();
    prop::collection::vec(0u32..200, names.len()).prop_map(move |quantities| {
        names
            .iter()
            .cloned()
            .zip(quantities)
            .collect::<Allocation>()
    })
}

fn household_strategy() -> impl Strategy<Value = u32> {
    0u32..=50
}

fn scenario_catalog() -> Vec<CropProfile> {
    vec![
        CropProfile {
            name: "Potatis".to_string(),
            total_calories: 64000.0,
            yield_plants: 80.0,
            space_required_total: 20.0,
            cost_per_plant: Decimal::from(2),
            sowing_months: vec![4, 5],
            harvesting_months: vec![7, 8, 9],
            difficulty: Difficulty::Beginner,
        },
        CropProfile {
            name: "Morötter".to_string(),
            total_calories: 9600.0,
            yield_plants: 24.0,
            space_required_total: 8.0,
            cost_per_plant: Decimal::from(1),
            sowing_months: vec![4, 5, 6],
            harvesting_months: vec![7, 8, 9, 10],
            difficulty: Difficulty::Beginner,
        },
    ]
}

fn scenario_allocation() -> Allocation {
    let mut allocation = Allocation::new();
    allocation.set("Potatis", 10);
    allocation.set("Morötter", 20);
    allocation
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property 1: space used is the plain sum of per-plant space times quantity
    #[test]
    fn prop_space_used_is_exact(
        allocation in allocation_strategy(),
        intensity in intensity_strategy(),
    ) {
        let catalog = default_catalog();
        let production = compute_production(&allocation, &catalog, intensity);

        let mut expected = 0.0;
        for (name, quantity) in allocation.iter() {
            let crop = catalog.iter().find(|c| c.name == name).unwrap();
            expected += crop.space_per_plant() * f64::from(quantity);
        }

        prop_assert_eq!(production.space_used, expected);
    }

    /// Property 2: more plants of one crop never lowers self-sufficiency
    #[test]
    fn prop_self_sufficiency_monotonic(
        allocation in allocation_strategy(),
        intensity in intensity_strategy(),
        household in household_strategy(),
        crop_index in 0usize..10,
        extra in 1u32..100,
    ) {
        let catalog = default_catalog();
        let crop = &catalog[crop_index].name;

        let mut more = allocation.clone();
        more.set(crop.clone(), allocation.quantity(crop) + extra);

        let before = evaluate_self_sufficiency(
            &compute_production(&allocation, &catalog, intensity),
            household,
        );
        let after = evaluate_self_sufficiency(
            &compute_production(&more, &catalog, intensity),
            household,
        );

        prop_assert!(after.percent >= before.percent);
        prop_assert!(after.grocery_calories <= before.grocery_calories);
    }

    /// Property 5: recalculating unchanged inputs is bit-identical
    #[test]
    fn prop_recalculation_idempotent(
        allocation in allocation_strategy(),
        intensity in intensity_strategy(),
        household in household_strategy(),
        garden in 1.0f64..500.0,
    ) {
        let catalog = default_catalog();
        let parameters = PlanParameters::new(household, garden, intensity);

        let first = recalculate(&parameters, &allocation, &catalog);
        let second = recalculate(&parameters, &allocation, &catalog);

        prop_assert_eq!(first.production.calories.to_bits(), second.production.calories.to_bits());
        prop_assert_eq!(first.production.space_used.to_bits(), second.production.space_used.to_bits());
        prop_assert_eq!(first, second);
    }

    /// Cost and space ignore intensity
    #[test]
    fn prop_intensity_scales_calories_only(allocation in allocation_strategy()) {
        let catalog = default_catalog();
        let low = compute_production(&allocation, &catalog, CultivationIntensity::Low);
        let high = compute_production(&allocation, &catalog, CultivationIntensity::High);

        prop_assert_eq!(low.cost, high.cost);
        prop_assert_eq!(low.space_used, high.space_used);
        prop_assert!(high.calories >= low.calories);
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_scenario_medium_intensity() {
        let production = compute_production(
            &scenario_allocation(),
            &scenario_catalog(),
            CultivationIntensity::Medium,
        );

        assert_eq!(production.calories, 16000.0);
        assert_eq!(production.cost, Decimal::from(40));
        assert!((production.space_used - 9.1667).abs() < 0.001);

        let sufficiency = evaluate_self_sufficiency(&production, 4);
        assert_eq!(sufficiency.annual_need, 2_920_000.0);
        assert_eq!(sufficiency.percent, 1);
        assert_eq!(sufficiency.grocery_calories, 2_904_000.0);
    }

    #[test]
    fn test_scenario_high_intensity() {
        let medium = compute_production(
            &scenario_allocation(),
            &scenario_catalog(),
            CultivationIntensity::Medium,
        );
        let high = compute_production(
            &scenario_allocation(),
            &scenario_catalog(),
            CultivationIntensity::High,
        );

        assert!((high.calories - 20800.0).abs() < 1e-9);
        assert_eq!(high.cost, medium.cost);
        assert_eq!(high.space_used, medium.space_used);
    }

    #[test]
    fn test_standard_catalog_matches_scenario() {
        let production = compute_production(
            &scenario_allocation(),
            &default_catalog(),
            CultivationIntensity::Medium,
        );
        assert_eq!(production.calories, 16000.0);
        assert_eq!(production.cost, Decimal::from(40));
    }

    #[test]
    fn test_zero_household() {
        let production = compute_production(
            &scenario_allocation(),
            &scenario_catalog(),
            CultivationIntensity::Medium,
        );
        let sufficiency = evaluate_self_sufficiency(&production, 0);
        assert_eq!(sufficiency.percent, 0);
        assert_eq!(sufficiency.grocery_calories, 0.0);
    }

    #[test]
    fn test_empty_allocation() {
        let production = compute_production(
            &Allocation::new(),
            &scenario_catalog(),
            CultivationIntensity::High,
        );
        assert_eq!(production.calories, 0.0);
        assert_eq!(production.cost, Decimal::ZERO);
        assert_eq!(production.space_used, 0.0);
    }

    #[test]
    fn test_empty_catalog() {
        let parameters = PlanParameters::new(4, 50.0, CultivationIntensity::Medium);
        let snapshot = recalculate(&parameters, &scenario_allocation(), &[]);

        assert_eq!(snapshot.production.calories, 0.0);
        assert_eq!(snapshot.self_sufficiency.percent, 0);
        assert_eq!(snapshot.monthly_tasks.len(), 12);
    }

    #[test]
    fn test_zero_yield_does_not_produce_nan() {
        let mut catalog = scenario_catalog();
        catalog[0].yield_plants = 0.0;

        let production = compute_production(
            &scenario_allocation(),
            &catalog,
            CultivationIntensity::Medium,
        );
        assert!(production.calories.is_finite());
        assert!(production.space_used.is_finite());
        // Yield defaults to one plant: 10 × 64000 + 20 × 400
        assert_eq!(production.calories, 648_000.0);
    }
}
