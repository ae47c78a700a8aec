//! Mock providers for tests and local runs
//!
//! Providers that answer without network access so the wizard can be
//! driven end to end.

use std::collections::HashMap;

use async_trait::async_trait;

use solar_types::{
	BuildingData, GeocodedAddress, GeocodingProvider, LatLng, ProviderError, ProviderInfo,
	ProviderResult, SolarDataProvider,
};

/// Geocoder backed by a fixed address table
///
/// Lookups are case-insensitive on the trimmed address. Unknown addresses
/// fail with [`ProviderError::NotFound`].
#[derive(Debug, Clone)]
pub struct MockGeocoder {
	info: ProviderInfo,
	addresses: HashMap<String, GeocodedAddress>,
}

impl MockGeocoder {
	pub fn new() -> Self {
		Self {
			info: ProviderInfo::new("mock-geocoding", "Mock Geocoder", "1.0.0"),
			addresses: HashMap::new(),
		}
	}

	/// Register `address` at `location`
	pub fn with_address(mut self, address: &str, formatted: &str, location: LatLng) -> Self {
		self.addresses.insert(
			address.trim().to_lowercase(),
			GeocodedAddress {
				formatted_address: formatted.to_string(),
				location,
				place_id: None,
			},
		);
		self
	}

	/// Geocoder that knows one Denver address
	pub fn denver() -> Self {
		Self::new().with_address(
			"1600 Pennsylvania St, Denver",
			"1600 Pennsylvania St, Denver, CO 80203, USA",
			LatLng::new(39.7420, -104.9809),
		)
	}
}

impl Default for MockGeocoder {
	fn default() -> Self {
		Self::denver()
	}
}

#[async_trait]
impl GeocodingProvider for MockGeocoder {
	fn provider_info(&self) -> &ProviderInfo {
		&self.info
	}

	async fn geocode(&self, address: &str) -> ProviderResult<GeocodedAddress> {
		self.addresses
			.get(&address.trim().to_lowercase())
			.cloned()
			.ok_or_else(|| ProviderError::NotFound {
				query: address.to_string(),
			})
	}
}

/// Solar provider that always fails with the given upstream status
#[derive(Debug, Clone)]
pub struct FailingSolarProvider {
	info: ProviderInfo,
	status: u16,
}

impl FailingSolarProvider {
	pub fn new(status: u16) -> Self {
		Self {
			info: ProviderInfo::new("failing-solar", "Failing Solar Provider", "1.0.0"),
			status,
		}
	}
}

impl Default for FailingSolarProvider {
	fn default() -> Self {
		Self::new(503)
	}
}

#[async_trait]
impl SolarDataProvider for FailingSolarProvider {
	fn provider_info(&self) -> &ProviderInfo {
		&self.info
	}

	async fn building_insights(&self, _location: &LatLng) -> ProviderResult<BuildingData> {
		Err(ProviderError::from_http_failure(self.status))
	}

	async fn health_check(&self) -> ProviderResult<bool> {
		Ok(false)
	}
}
