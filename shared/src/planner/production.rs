//! Production calculator: allocation to aggregate calories, cost and space

use rust_decimal::Decimal;

use crate::models::{Allocation, CropProfile, CultivationIntensity, ProductionResult};

/// Aggregate production of the selected crops.
///
/// Crops missing from the catalog are skipped. Calories scale with the
/// cultivation intensity; cost and space do not. Values are not rounded.
/// Cost saturates at `Decimal::MAX`.
pub fn compute_production(
    allocation: &Allocation,
    catalog: &[CropProfile],
    intensity: CultivationIntensity,
) -> ProductionResult {
    let multiplier = intensity.multiplier();
    let mut result = ProductionResult::default();

    for (name, quantity) in allocation.iter() {
        let Some(crop) = find_crop(catalog, name) else {
            continue;
        };
        let plants = f64::from(quantity);

        result.calories += crop.calories_per_plant() * plants * multiplier;
        result.cost = result
            .cost
            .saturating_add(crop.cost_per_plant.saturating_mul(Decimal::from(quantity)));
        result.space_used += crop.space_per_plant() * plants;
    }

    result
}

/// Look up a crop by name
pub fn find_crop<'a>(catalog: &'a [CropProfile], name: &str) -> Option<&'a CropProfile> {
    catalog.iter().find(|crop| crop.name == name)
}

/// Catalog entries in order, skipping later profiles that repeat a name.
///
/// Matches `find_crop`, which always resolves a name to its first profile.
pub fn unique_crops(catalog: &[CropProfile]) -> impl Iterator<Item = &CropProfile> {
    catalog
        .iter()
        .enumerate()
        .filter(|(index, crop)| !catalog[..*index].iter().any(|c| c.name == crop.name))
        .map(|(_, crop)| crop)
}
