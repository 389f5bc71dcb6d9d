//! External API integrations

pub mod crop_catalog;

pub use crop_catalog::CropCatalogClient;
