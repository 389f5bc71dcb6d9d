//! Allocation recommender
//!
//! Greedy fill by calorie density that proposes a starting crop mix for a
//! new plan. Each crop only receives a density-tiered share of the space that
//! is still free, so the result spreads across several crops instead of
//! filling the garden with the single densest one. Garden staples are then
//! topped up if the mix is still narrow.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::quantity::default_quantity;
use crate::models::{Allocation, CropProfile};

/// Share of the garden the recommender plans into
pub const USABLE_SPACE_FRACTION: f64 = 0.9;

/// Distinct crops the recommender selects at most
pub const MAX_DISTINCT_CROPS: usize = 8;

/// Plant count bounds for the density pass
pub const MAX_PLANTS_PER_CROP: u32 = 30;
pub const MIN_PLANTS_PER_CROP: u32 = 2;

/// Staples are added while fewer than this many crops are selected
pub const ESSENTIAL_TARGET: usize = 6;

/// Garden staples, in the order they are force-included
pub const ESSENTIAL_CROPS: &[&str] = &[
    "Potatis",
    "Morötter",
    "Lök",
    "Vitkål",
    "Bondbönor",
    "Ärtor",
];

/// Calorie density band of a crop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DensityTier {
    /// At least 2000 kcal/m²
    High,
    /// At least 800 kcal/m²
    Medium,
    Low,
}

impl DensityTier {
    pub fn from_density(calories_per_m2: f64) -> Self {
        if calories_per_m2 >= 2000.0 {
            DensityTier::High
        } else if calories_per_m2 >= 800.0 {
            DensityTier::Medium
        } else {
            DensityTier::Low
        }
    }

    /// Fraction of the remaining usable space a crop in this tier may take
    pub fn space_fraction(&self) -> f64 {
        match self {
            DensityTier::High => 0.10,
            DensityTier::Medium => 0.05,
            DensityTier::Low => 0.02,
        }
    }
}

/// Running space and spend while the recommendation is built
struct FillState {
    usable_space: f64,
    space_used: f64,
    budget_ceiling: Option<Decimal>,
    spent: Decimal,
}

impl FillState {
    fn remaining_space(&self) -> f64 {
        (self.usable_space - self.space_used).max(0.0)
    }

    fn is_full(&self) -> bool {
        self.space_used >= self.usable_space
    }

    /// Plants of a crop that fit the remaining space and budget
    fn max_plants(&self, crop: &CropProfile, cap: u32) -> u32 {
        let space_per_plant = crop.space_per_plant();
        let by_space = if space_per_plant > 0.0 {
            floor_count(self.remaining_space() / space_per_plant, cap)
        } else {
            cap
        };

        let by_budget = match self.budget_ceiling {
            Some(ceiling) if crop.cost_per_plant > Decimal::ZERO => {
                let remaining = ceiling.saturating_sub(self.spent);
                if remaining <= Decimal::ZERO {
                    0
                } else {
                    // An overflowing quotient means the price is negligible
                    remaining
                        .checked_div(crop.cost_per_plant)
                        .and_then(|plants| plants.floor().to_u32())
                        .unwrap_or(cap)
                        .min(cap)
                }
            }
            _ => cap,
        };

        by_space.min(by_budget)
    }

    fn fits(&self, crop: &CropProfile, quantity: u32) -> bool {
        self.max_plants(crop, u32::MAX) >= quantity
    }

    fn take(&mut self, crop: &CropProfile, quantity: u32) {
        self.space_used += crop.space_per_plant() * f64::from(quantity);
        self.spent = self
            .spent
            .saturating_add(crop.cost_per_plant.saturating_mul(Decimal::from(quantity)));
    }
}

fn floor_count(value: f64, cap: u32) -> u32 {
    if !value.is_finite() || value >= f64::from(cap) {
        cap
    } else if value <= 0.0 {
        0
    } else {
        value.floor() as u32
    }
}

/// Propose a starting allocation for a garden.
///
/// Returns an empty allocation for an empty catalog or a garden without area.
pub fn recommend_allocation(
    catalog: &[CropProfile],
    garden_size_m2: f64,
    budget_ceiling: Option<Decimal>,
) -> Allocation {
    let mut allocation = Allocation::new();
    if catalog.is_empty() || !garden_size_m2.is_finite() || garden_size_m2 <= 0.0 {
        return allocation;
    }

    let mut state = FillState {
        usable_space: garden_size_m2 * USABLE_SPACE_FRACTION,
        space_used: 0.0,
        budget_ceiling,
        spent: Decimal::ZERO,
    };

    // Stable sort keeps catalog order among equally dense crops
    let mut ranked: Vec<&CropProfile> = catalog.iter().collect();
    ranked.sort_by(|a, b| b.calories_per_m2().total_cmp(&a.calories_per_m2()));

    for crop in ranked {
        if state.is_full() || allocation.selected_count() >= MAX_DISTINCT_CROPS {
            break;
        }
        if allocation.is_selected(&crop.name) {
            continue;
        }

        let max_plants = state.max_plants(crop, MAX_PLANTS_PER_CROP);
        if max_plants == 0 {
            continue;
        }

        let quantity = tiered_quantity(crop, state.remaining_space()).min(max_plants);
        state.take(crop, quantity);
        allocation.set(crop.name.clone(), quantity);
    }

    // Staples may use the headroom the density pass keeps back
    state.usable_space = garden_size_m2;
    add_essentials(&mut allocation, &mut state, catalog, garden_size_m2);

    allocation
}

/// Plants for a crop's tier share of the remaining space, within `[2, 30]`
fn tiered_quantity(crop: &CropProfile, remaining_space: f64) -> u32 {
    let tier = DensityTier::from_density(crop.calories_per_m2());
    let space_per_plant = crop.space_per_plant();
    let raw = if space_per_plant > 0.0 {
        floor_count(
            remaining_space * tier.space_fraction() / space_per_plant,
            MAX_PLANTS_PER_CROP,
        )
    } else {
        MAX_PLANTS_PER_CROP
    };
    raw.clamp(MIN_PLANTS_PER_CROP, MAX_PLANTS_PER_CROP)
}

fn add_essentials(
    allocation: &mut Allocation,
    state: &mut FillState,
    catalog: &[CropProfile],
    garden_size_m2: f64,
) {
    for name in ESSENTIAL_CROPS {
        let selected = allocation.selected_count();
        if selected >= ESSENTIAL_TARGET || selected >= MAX_DISTINCT_CROPS {
            break;
        }
        if allocation.is_selected(name) {
            continue;
        }
        let Some(crop) = catalog.iter().find(|crop| crop.name == *name) else {
            continue;
        };

        let quantity = default_quantity(name, garden_size_m2);
        if state.fits(crop, quantity) {
            state.take(crop, quantity);
            allocation.set(crop.name.clone(), quantity);
        }
    }
}
