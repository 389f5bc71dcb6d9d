//! Crop Catalog Client
//!
//! Client for the generative crop suggestion service. The service receives the
//! household profile and garden size and answers with a list of crop profiles.
//! Requests are made once with a timeout; failures are returned to the caller,
//! which substitutes the standard crop list.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use shared::CultivationIntensity;

use crate::config::CatalogConfig;
use crate::error::{AppError, AppResult};

/// Client for the crop suggestion service
#[derive(Clone)]
pub struct CropCatalogClient {
    api_endpoint: String,
    api_key: Option<String>,
    http_client: Client,
}

/// Request sent to the suggestion service
#[derive(Debug, Clone, Serialize)]
pub struct SuggestCropsRequest {
    pub household_size: u32,
    pub garden_size_m2: f64,
    pub intensity: CultivationIntensity,
    /// Region or climate hint passed through from the client
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl CropCatalogClient {
    /// Create a new crop catalog client
    pub fn new(api_endpoint: String, api_key: Option<String>, timeout: Duration) -> AppResult<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_endpoint,
            api_key,
            http_client,
        })
    }

    /// Create a client from configuration. Returns `None` when the provider is
    /// disabled or has no endpoint.
    pub fn from_config(config: &CatalogConfig) -> AppResult<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        let Some(endpoint) = config.endpoint.clone().filter(|e| !e.trim().is_empty()) else {
            return Ok(None);
        };

        Self::new(
            endpoint,
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
        .map(Some)
    }

    pub fn endpoint(&self) -> &str {
        &self.api_endpoint
    }

    /// Ask the provider for crop suggestions and return the raw response body
    pub async fn suggest_crops(&self, request: &SuggestCropsRequest) -> AppResult<String> {
        let mut builder = self
            .http_client
            .post(&self.api_endpoint)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(api_key) = &self.api_key {
            builder = builder.header("x-api-key", api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| AppError::CatalogProvider(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::CatalogProvider(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::CatalogProvider(format!("Failed to read response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_provider_builds_no_client() {
        let config = CatalogConfig {
            endpoint: Some("http://localhost:9000/suggest".to_string()),
            api_key: None,
            timeout_secs: 5,
            enabled: false,
        };
        assert!(CropCatalogClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_missing_endpoint_builds_no_client() {
        let config = CatalogConfig {
            endpoint: Some("  ".to_string()),
            api_key: None,
            timeout_secs: 5,
            enabled: true,
        };
        assert!(CropCatalogClient::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_enabled_provider_builds_client() {
        let config = CatalogConfig {
            endpoint: Some("http://localhost:9000/suggest".to_string()),
            api_key: Some("key".to_string()),
            timeout_secs: 5,
            enabled: true,
        };
        let client = CropCatalogClient::from_config(&config).unwrap().unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9000/suggest");
    }

    #[test]
    fn test_request_omits_missing_region() {
        let request = SuggestCropsRequest {
            household_size: 4,
            garden_size_m2: 50.0,
            intensity: CultivationIntensity::High,
            region: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["intensity"], "high");
        assert!(json.get("region").is_none());
    }
}
