//! Solar Quote Types
//!
//! Shared models and traits for the solar quote service.
//! Domain models are grouped by concern: the wizard's quote inputs and
//! outputs, building data from the solar API, sessions, leads, map views,
//! and the provider and storage seams.

pub mod building;
pub mod constants;
pub mod integrity;
pub mod leads;
pub mod map;
pub mod models;
pub mod pricing;
pub mod providers;
pub mod quotes;
pub mod sessions;
pub mod storage;

// Re-export chrono and serde_json for convenience
pub use chrono;
pub use serde_json;

pub use building::{
	BuildingData, DataLayers, ImageryDate, RoofSegment, SolarPanel, SolarPotential,
};
pub use integrity::IntegrityPayload;
pub use leads::{
	ContactInfo, Lead, LeadAcknowledgement, LeadRequest, LeadValidationError,
	LeadValidationResult,
};
pub use map::{MapMarker, MapView, OverlayLayer, PanelLayout, PanelMarker};
pub use models::{GeocodedAddress, LatLng, SecretString};
pub use pricing::{LayoutConfig, PricingConfig};
pub use providers::{
	GeocodingProvider, ProviderError, ProviderInfo, ProviderResult, SolarDataProvider,
};
pub use quotes::{
	Interest, PanelSpec, PanelType, QuoteData, QuoteError, QuoteResult, QuoteValidationError,
	QuoteValidationResult, RoofType, SolarQuote, SolarSystem, WarrantyTier,
};
pub use sessions::{BuildingDataSource, QuoteSession, WizardStep};
pub use storage::{
	LeadStorageTrait, SessionStorageTrait, StorageError, StorageResult, StorageStats,
	StorageTrait,
};
