//! Crop catalog service
//!
//! Resolves the catalog a plan is built from. Provider output goes through the
//! typed boundary in `shared::catalog`; any failure yields the standard crop
//! list and a notice, never an error.

use serde::Deserialize;
use shared::{default_catalog, resolve_catalog, CatalogOutcome, CropProfile, CultivationIntensity};

use crate::external::crop_catalog::{CropCatalogClient, SuggestCropsRequest};

/// Catalog service wrapping the optional provider client
#[derive(Clone)]
pub struct CatalogService {
    client: Option<CropCatalogClient>,
}

/// Input for requesting crop suggestions
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestCropsInput {
    pub household_size: u32,
    pub garden_size_m2: f64,
    #[serde(default)]
    pub intensity: CultivationIntensity,
    pub region: Option<String>,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(client: Option<CropCatalogClient>) -> Self {
        Self { client }
    }

    pub fn is_provider_enabled(&self) -> bool {
        self.client.is_some()
    }

    /// The standard crop list
    pub fn default_crops(&self) -> Vec<CropProfile> {
        default_catalog()
    }

    /// Ask the provider for a catalog, falling back to the standard list
    pub async fn suggest(&self, input: SuggestCropsInput) -> CatalogOutcome {
        let Some(client) = &self.client else {
            tracing::debug!("Crop catalog provider disabled, using standard crop list");
            return CatalogOutcome::fallback("provider not configured");
        };

        let request = SuggestCropsRequest {
            household_size: input.household_size,
            garden_size_m2: input.garden_size_m2,
            intensity: input.intensity,
            region: input.region,
        };

        let body = client.suggest_crops(&request).await;
        let outcome = resolve_catalog(body.as_deref());

        match &outcome.notice {
            Some(notice) => tracing::warn!(endpoint = client.endpoint(), "{}", notice),
            None => tracing::info!(crops = outcome.crops.len(), "Crop catalog generated by provider"),
        }

        outcome
    }
}
