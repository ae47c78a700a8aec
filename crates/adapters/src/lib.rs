//! Solar Quote Adapters
//!
//! Outbound geocoding and solar data providers.

pub mod client_cache;
pub mod google_geocoding;
pub mod google_solar;
pub mod http;
pub mod mock_solar;

use std::sync::Arc;
use std::time::Duration;

pub use client_cache::{ClientCache, ClientConfig};
pub use google_geocoding::GoogleGeocodingAdapter;
pub use google_solar::GoogleSolarAdapter;
pub use mock_solar::{mock_building_data, MockSolarProvider};
pub use solar_types::{
	GeocodingProvider, ProviderError, ProviderResult, SecretString, SolarDataProvider,
};

use solar_types::constants::providers::{
	GOOGLE_GEOCODING_PROVIDER_ID, GOOGLE_SOLAR_PROVIDER_ID, MOCK_SOLAR_PROVIDER_ID,
};

/// Creates providers from their configured id
pub struct ProviderFactory {
	cache: ClientCache,
}

impl ProviderFactory {
	pub fn new() -> Self {
		Self::with_cache(ClientCache::new())
	}

	/// Factory whose HTTP providers share `cache`
	pub fn with_cache(cache: ClientCache) -> Self {
		Self { cache }
	}

	pub fn create_geocoder(
		&self,
		provider_id: &str,
		endpoint: &str,
		api_key: Option<SecretString>,
		timeout_ms: u64,
	) -> ProviderResult<Arc<dyn GeocodingProvider>> {
		match provider_id {
			GOOGLE_GEOCODING_PROVIDER_ID => {
				let key = require_key(provider_id, api_key)?;
				Ok(Arc::new(GoogleGeocodingAdapter::with_cache(
					endpoint,
					key,
					timeout_ms,
					self.cache.clone(),
				)?))
			},
			_ => Err(ProviderError::NotRegistered {
				provider_id: provider_id.to_string(),
			}),
		}
	}

	pub fn create_solar_provider(
		&self,
		provider_id: &str,
		endpoint: &str,
		api_key: Option<SecretString>,
		timeout_ms: u64,
		mock_delay: Duration,
	) -> ProviderResult<Arc<dyn SolarDataProvider>> {
		match provider_id {
			GOOGLE_SOLAR_PROVIDER_ID => {
				let key = require_key(provider_id, api_key)?;
				Ok(Arc::new(GoogleSolarAdapter::with_cache(
					endpoint,
					key,
					timeout_ms,
					self.cache.clone(),
				)?))
			},
			MOCK_SOLAR_PROVIDER_ID => Ok(Arc::new(MockSolarProvider::new(mock_delay))),
			_ => Err(ProviderError::NotRegistered {
				provider_id: provider_id.to_string(),
			}),
		}
	}
}

impl Default for ProviderFactory {
	fn default() -> Self {
		Self::new()
	}
}

fn require_key(provider_id: &str, api_key: Option<SecretString>) -> ProviderResult<SecretString> {
	api_key
		.filter(|key| !key.is_empty())
		.ok_or_else(|| ProviderError::MissingApiKey {
			provider_id: provider_id.to_string(),
		})
}
