//! Crop catalogs
//!
//! The static default catalog, the typed boundary for catalogs returned by a
//! generative provider, and custom crops added to a session's local copy.
//! Provider output is never repaired as text: it either deserializes into
//! crop entries or the default catalog is used.

use chrono::Month;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{CropProfile, Difficulty};
use crate::types::is_valid_month;
use crate::validation::validate_crop_profile;

/// Catalog errors at the provider boundary and for custom crops
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed catalog response: {0}")]
    Malformed(String),

    #[error("Catalog contains no usable crops")]
    Empty,

    #[error("Crop already in catalog: {0}")]
    DuplicateCrop(String),

    #[error("Invalid crop: {0}")]
    InvalidCrop(&'static str),
}

/// Where a session's catalog came from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Generated,
    Fallback,
}

/// A usable catalog plus an informational notice when the fallback was used
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogOutcome {
    pub crops: Vec<CropProfile>,
    pub source: CatalogSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

impl CatalogOutcome {
    pub fn generated(crops: Vec<CropProfile>) -> Self {
        Self {
            crops,
            source: CatalogSource::Generated,
            notice: None,
        }
    }

    pub fn fallback(reason: impl std::fmt::Display) -> Self {
        Self {
            crops: default_catalog(),
            source: CatalogSource::Fallback,
            notice: Some(format!(
                "Crop suggestions are unavailable ({}); using the standard crop list",
                reason
            )),
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == CatalogSource::Fallback
    }
}

#[allow(clippy::too_many_arguments)]
fn profile(
    name: &str,
    total_calories: f64,
    yield_plants: f64,
    space_required_total: f64,
    cost_per_plant: Decimal,
    sowing_months: &[u32],
    harvesting_months: &[u32],
    difficulty: Difficulty,
) -> CropProfile {
    CropProfile {
        name: name.to_string(),
        total_calories,
        yield_plants,
        space_required_total,
        cost_per_plant,
        sowing_months: sowing_months.to_vec(),
        harvesting_months: harvesting_months.to_vec(),
        difficulty,
    }
}

/// Standard Swedish kitchen-garden catalog used when no provider catalog is available
pub fn default_catalog() -> Vec<CropProfile> {
    use Difficulty::*;

    let half = Decimal::new(5, 1);
    vec![
        profile("Potatis", 64000.0, 80.0, 20.0, Decimal::from(2), &[4, 5], &[7, 8, 9], Beginner),
        profile("Morötter", 9600.0, 24.0, 8.0, Decimal::ONE, &[4, 5, 6], &[7, 8, 9, 10], Beginner),
        profile("Lök", 6000.0, 40.0, 4.0, half, &[4, 5], &[8, 9], Beginner),
        profile("Vitkål", 7200.0, 8.0, 4.0, Decimal::from(3), &[3, 4], &[9, 10, 11], Intermediate),
        profile("Bondbönor", 12000.0, 20.0, 4.0, Decimal::new(15, 1), &[4, 5], &[7, 8], Beginner),
        profile("Ärtor", 8000.0, 40.0, 4.0, half, &[4, 5], &[6, 7, 8], Beginner),
        profile("Rödbetor", 4800.0, 30.0, 3.0, half, &[5, 6], &[8, 9, 10], Beginner),
        profile("Grönkål", 2000.0, 10.0, 4.0, Decimal::from(2), &[4, 5], &[9, 10, 11, 12], Beginner),
        profile("Tomater", 3600.0, 6.0, 3.0, Decimal::from(5), &[3, 4], &[7, 8, 9], Intermediate),
        profile("Sallad", 600.0, 20.0, 2.0, half, &[4, 5, 6, 7], &[6, 7, 8, 9], Beginner),
    ]
}

/// A month as sent by a provider, either a number or a name
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMonth {
    Number(i64),
    Name(String),
}

impl RawMonth {
    fn to_month(&self) -> Option<u32> {
        match self {
            RawMonth::Number(n) => u32::try_from(*n).ok().filter(|m| is_valid_month(*m)),
            RawMonth::Name(name) => name
                .trim()
                .parse::<Month>()
                .ok()
                .map(|m| m.number_from_month()),
        }
    }
}

/// Crop entry as received from a provider, before validation
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCropProfile {
    pub name: Option<String>,
    #[serde(alias = "totalCalories")]
    pub total_calories: Option<f64>,
    #[serde(alias = "caloriesPerPlant")]
    pub calories_per_plant: Option<f64>,
    #[serde(rename = "yield", alias = "yield_plants")]
    pub yield_plants: Option<f64>,
    #[serde(alias = "spaceRequiredTotal")]
    pub space_required_total: Option<f64>,
    #[serde(alias = "costPerPlant")]
    pub cost_per_plant: Option<Decimal>,
    #[serde(default, alias = "sowingMonths")]
    pub sowing_months: Vec<RawMonth>,
    #[serde(default, alias = "harvestingMonths")]
    pub harvesting_months: Vec<RawMonth>,
    pub difficulty: Option<String>,
}

fn non_negative(value: Option<f64>) -> Result<f64, &'static str> {
    match value {
        None => Ok(0.0),
        Some(v) if !v.is_finite() => Err("Numeric values must be finite"),
        Some(v) if v < 0.0 => Err("Numeric values cannot be negative"),
        Some(v) => Ok(v),
    }
}

fn normalize_months(raw: &[RawMonth]) -> Vec<u32> {
    let mut months: Vec<u32> = raw.iter().filter_map(RawMonth::to_month).collect();
    months.sort_unstable();
    months.dedup();
    months
}

impl RawCropProfile {
    /// Validate and default a provider entry.
    ///
    /// A missing or zero yield becomes one plant; missing numbers become zero.
    /// Blank names and negative or non-finite numbers are rejected.
    pub fn into_profile(self) -> Result<CropProfile, &'static str> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or("Crop name is required")?;

        let yield_plants = match non_negative(self.yield_plants)? {
            y if y > 0.0 => y,
            _ => 1.0,
        };

        let total_calories = match (self.total_calories, self.calories_per_plant) {
            (Some(total), _) => non_negative(Some(total))?,
            (None, Some(per_plant)) => non_negative(Some(per_plant))? * yield_plants.max(1.0),
            (None, None) => 0.0,
        };

        let cost_per_plant = self.cost_per_plant.unwrap_or(Decimal::ZERO);
        if cost_per_plant < Decimal::ZERO {
            return Err("Numeric values cannot be negative");
        }

        let profile = CropProfile {
            name,
            total_calories,
            yield_plants,
            space_required_total: non_negative(self.space_required_total)?,
            cost_per_plant,
            sowing_months: normalize_months(&self.sowing_months),
            harvesting_months: normalize_months(&self.harvesting_months),
            difficulty: self
                .difficulty
                .and_then(|d| d.parse().ok())
                .unwrap_or_default(),
        };

        validate_crop_profile(&profile)?;
        Ok(profile)
    }
}

/// Turn provider entries into a catalog, dropping invalid entries and
/// later duplicates of a name
pub fn sanitize_catalog(raw: Vec<RawCropProfile>) -> Vec<CropProfile> {
    let mut catalog: Vec<CropProfile> = Vec::with_capacity(raw.len());
    for entry in raw {
        let Ok(profile) = entry.into_profile() else {
            continue;
        };
        if !catalog.iter().any(|existing| existing.name == profile.name) {
            catalog.push(profile);
        }
    }
    catalog
}

/// Parse a provider response body.
///
/// Accepts a JSON array of crops or an object with a `crops` array. Entries
/// that fail to deserialize or validate are dropped individually.
pub fn parse_catalog_response(body: &str) -> Result<Vec<CropProfile>, CatalogError> {
    let value: serde_json::Value =
        serde_json::from_str(body.trim()).map_err(|e| CatalogError::Malformed(e.to_string()))?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        serde_json::Value::Object(mut object) => match object.remove("crops") {
            Some(serde_json::Value::Array(entries)) => entries,
            _ => {
                return Err(CatalogError::Malformed(
                    "expected a `crops` array".to_string(),
                ))
            }
        },
        _ => {
            return Err(CatalogError::Malformed(
                "expected an array of crops".to_string(),
            ))
        }
    };

    let raw: Vec<RawCropProfile> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    let catalog = sanitize_catalog(raw);
    if catalog.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(catalog)
}

/// Parse a provider result or fall back to the default catalog
pub fn resolve_catalog<E: std::fmt::Display>(response: Result<&str, E>) -> CatalogOutcome {
    match response {
        Ok(body) => match parse_catalog_response(body) {
            Ok(crops) => CatalogOutcome::generated(crops),
            Err(e) => CatalogOutcome::fallback(e),
        },
        Err(e) => CatalogOutcome::fallback(e),
    }
}

/// Reject a catalog in which two profiles share a name
pub fn ensure_unique_names(catalog: &[CropProfile]) -> Result<(), CatalogError> {
    for (index, crop) in catalog.iter().enumerate() {
        if catalog[..index].iter().any(|earlier| earlier.name == crop.name) {
            return Err(CatalogError::DuplicateCrop(crop.name.clone()));
        }
    }
    Ok(())
}

/// Add a user-defined crop to a session's local catalog
pub fn add_custom_crop(
    catalog: &mut Vec<CropProfile>,
    crop: CropProfile,
) -> Result<(), CatalogError> {
    validate_crop_profile(&crop).map_err(CatalogError::InvalidCrop)?;
    if catalog.iter().any(|existing| existing.name == crop.name) {
        return Err(CatalogError::DuplicateCrop(crop.name));
    }
    catalog.push(crop);
    Ok(())
}
