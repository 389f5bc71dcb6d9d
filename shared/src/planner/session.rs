//! Recalculation loop for a single planning session

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::{default_quantity, recalculate, recommend_allocation};
use crate::catalog::{add_custom_crop, CatalogError};
use crate::models::{
    Allocation, CropProfile, CultivationIntensity, GardenPlan, PlanParameters, PlanSnapshot,
};
use crate::validation::{validate_garden_size, validate_quantity};

type Observer = Box<dyn FnMut(&PlanSnapshot)>;

/// A planning session owning its catalog copy, parameters and allocation.
///
/// Every setter that changes a watched input (household size, garden size,
/// intensity, allocation) synchronously recomputes the plan and notifies
/// observers. Setters given an unchanged value do nothing. The budget is only
/// read by the recommender, which runs solely through
/// [`PlanningSession::apply_recommendation`].
pub struct PlanningSession {
    catalog: Vec<CropProfile>,
    parameters: PlanParameters,
    allocation: Allocation,
    snapshot: PlanSnapshot,
    user_modified: bool,
    recalculations: u64,
    observers: Vec<Observer>,
}

impl PlanningSession {
    /// Start a session with an empty allocation
    pub fn new(catalog: Vec<CropProfile>, parameters: PlanParameters) -> Self {
        Self::with_allocation(catalog, parameters, Allocation::new())
    }

    /// Start a session from the recommender's proposal
    pub fn recommended(catalog: Vec<CropProfile>, parameters: PlanParameters) -> Self {
        let allocation =
            recommend_allocation(&catalog, parameters.garden_size_m2, parameters.budget_ceiling);
        Self::with_allocation(catalog, parameters, allocation)
    }

    /// Restore a session from a reloaded plan document
    pub fn from_garden_plan(plan: GardenPlan) -> Self {
        let mut session = Self::with_allocation(plan.catalog, plan.parameters, plan.allocation);
        session.user_modified = true;
        session
    }

    fn with_allocation(
        catalog: Vec<CropProfile>,
        parameters: PlanParameters,
        allocation: Allocation,
    ) -> Self {
        let snapshot = recalculate(&parameters, &allocation, &catalog);
        Self {
            catalog,
            parameters,
            allocation,
            snapshot,
            user_modified: false,
            recalculations: 1,
            observers: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &[CropProfile] {
        &self.catalog
    }

    pub fn parameters(&self) -> &PlanParameters {
        &self.parameters
    }

    pub fn allocation(&self) -> &Allocation {
        &self.allocation
    }

    /// Latest recompute result
    pub fn snapshot(&self) -> &PlanSnapshot {
        &self.snapshot
    }

    /// Whether the allocation was edited since the last recommendation
    pub fn user_modified(&self) -> bool {
        self.user_modified
    }

    /// Number of recompute passes run, including the initial one
    pub fn recalculation_count(&self) -> u64 {
        self.recalculations
    }

    /// Register a callback run after every recompute
    pub fn subscribe(&mut self, observer: impl FnMut(&PlanSnapshot) + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn recompute(&mut self) {
        self.snapshot = recalculate(&self.parameters, &self.allocation, &self.catalog);
        self.recalculations += 1;
        for observer in self.observers.iter_mut() {
            observer(&self.snapshot);
        }
    }

    /// Returns whether the plan was recomputed
    pub fn set_household_size(&mut self, household_size: u32) -> bool {
        if self.parameters.household_size == household_size {
            return false;
        }
        self.parameters.household_size = household_size;
        self.recompute();
        true
    }

    /// Returns whether the plan was recomputed
    pub fn set_garden_size(&mut self, garden_size_m2: f64) -> Result<bool, &'static str> {
        validate_garden_size(garden_size_m2)?;
        if self.parameters.garden_size_m2 == garden_size_m2 {
            return Ok(false);
        }
        self.parameters.garden_size_m2 = garden_size_m2;
        self.recompute();
        Ok(true)
    }

    /// Returns whether the plan was recomputed
    pub fn set_intensity(&mut self, intensity: CultivationIntensity) -> bool {
        if self.parameters.intensity == intensity {
            return false;
        }
        self.parameters.intensity = intensity;
        self.recompute();
        true
    }

    /// Update the budget used by the next recommendation. Never recomputes.
    pub fn set_budget_ceiling(&mut self, budget_ceiling: Option<Decimal>) {
        self.parameters.budget_ceiling = budget_ceiling;
    }

    /// Set a crop's plant count; zero deselects it.
    /// Returns whether the plan was recomputed.
    pub fn set_quantity(&mut self, crop: &str, quantity: u32) -> Result<bool, &'static str> {
        validate_quantity(quantity)?;
        if !self.catalog.iter().any(|c| c.name == crop) {
            return Err("Crop is not in the catalog");
        }
        if self.allocation.quantity(crop) == quantity {
            return Ok(false);
        }
        self.allocation.set(crop, quantity);
        self.user_modified = true;
        self.recompute();
        Ok(true)
    }

    /// Check or uncheck a crop. Checking assigns the garden-scaled default
    /// quantity; checking an already selected crop keeps its quantity.
    pub fn toggle_crop(&mut self, crop: &str, selected: bool) -> Result<bool, &'static str> {
        if !selected {
            return Ok(self.remove_crop(crop));
        }
        if self.allocation.is_selected(crop) {
            return Ok(false);
        }
        let quantity = default_quantity(crop, self.parameters.garden_size_m2);
        self.set_quantity(crop, quantity)
    }

    /// Deselect a crop. Returns whether the plan was recomputed.
    pub fn remove_crop(&mut self, crop: &str) -> bool {
        if self.allocation.remove(crop).is_none() {
            return false;
        }
        self.user_modified = true;
        self.recompute();
        true
    }

    /// Add a custom crop to this session's catalog copy
    pub fn add_custom_crop(&mut self, crop: CropProfile) -> Result<(), CatalogError> {
        let name = crop.name.clone();
        add_custom_crop(&mut self.catalog, crop)?;
        // A reloaded allocation may already name the crop
        if self.allocation.is_selected(&name) {
            self.recompute();
        }
        Ok(())
    }

    /// Replace the allocation with a fresh recommendation
    pub fn apply_recommendation(&mut self) -> &PlanSnapshot {
        self.allocation = recommend_allocation(
            &self.catalog,
            self.parameters.garden_size_m2,
            self.parameters.budget_ceiling,
        );
        self.user_modified = false;
        self.recompute();
        &self.snapshot
    }

    /// Freeze the current state into a plan document
    pub fn to_garden_plan(&self, id: Uuid, created_at: DateTime<Utc>) -> GardenPlan {
        GardenPlan::from_snapshot(id, self.catalog.clone(), self.snapshot.clone(), created_at)
    }
}
