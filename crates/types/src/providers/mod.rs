//! Outbound data providers: geocoding and solar building data

pub mod errors;
pub mod traits;

use serde::{Deserialize, Serialize};

pub use errors::ProviderError;
pub use traits::{GeocodingProvider, SolarDataProvider};

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Descriptive information about a provider implementation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderInfo {
	pub provider_id: String,
	pub name: String,
	pub version: String,
	#[serde(default)]
	pub description: Option<String>,
}

impl ProviderInfo {
	pub fn new(provider_id: &str, name: &str, version: &str) -> Self {
		Self {
			provider_id: provider_id.to_string(),
			name: name.to_string(),
			version: version.to_string(),
			description: None,
		}
	}

	pub fn with_description(mut self, description: &str) -> Self {
		self.description = Some(description.to_string());
		self
	}
}
