//! Provider traits implemented by the HTTP clients and the mock

use async_trait::async_trait;
use std::fmt::Debug;

use super::{ProviderError, ProviderInfo, ProviderResult};
use crate::building::{BuildingData, DataLayers};
use crate::models::{GeocodedAddress, LatLng};

/// Turns a free-form address into coordinates
#[async_trait]
pub trait GeocodingProvider: Send + Sync + Debug {
	fn provider_info(&self) -> &ProviderInfo;

	fn id(&self) -> &str {
		&self.provider_info().provider_id
	}

	fn name(&self) -> &str {
		&self.provider_info().name
	}

	/// Resolve `address` to its best match
	async fn geocode(&self, address: &str) -> ProviderResult<GeocodedAddress>;

	async fn health_check(&self) -> ProviderResult<bool> {
		Ok(true)
	}
}

/// Supplies roof metadata and imagery for a location
#[async_trait]
pub trait SolarDataProvider: Send + Sync + Debug {
	fn provider_info(&self) -> &ProviderInfo;

	fn id(&self) -> &str {
		&self.provider_info().provider_id
	}

	fn name(&self) -> &str {
		&self.provider_info().name
	}

	/// Building insights for the building closest to `location`
	async fn building_insights(&self, location: &LatLng) -> ProviderResult<BuildingData>;

	/// Imagery overlays within `radius_meters` of `location`.
	///
	/// Providers without imagery keep the default, which reports the
	/// operation as unsupported.
	async fn data_layers(
		&self,
		_location: &LatLng,
		_radius_meters: f64,
	) -> ProviderResult<DataLayers> {
		Err(ProviderError::UnsupportedOperation {
			operation: "data_layers".to_string(),
			provider_id: self.id().to_string(),
		})
	}

	async fn health_check(&self) -> ProviderResult<bool> {
		Ok(true)
	}
}
