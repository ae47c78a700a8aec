//! Google Geocoding API client

use async_trait::async_trait;
use serde::Deserialize;
use solar_types::constants::providers::GOOGLE_GEOCODING_PROVIDER_ID;
use solar_types::{
	GeocodedAddress, GeocodingProvider, LatLng, ProviderError, ProviderInfo, ProviderResult,
	SecretString,
};
use tracing::{debug, info};

use crate::client_cache::{ClientCache, ClientConfig};
use crate::http::{build_url, get_json};

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://maps.googleapis.com/maps/api/geocode/json";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
	status: String,
	#[serde(default)]
	results: Vec<GeocodeResult>,
	#[serde(default)]
	error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
	formatted_address: String,
	geometry: Geometry,
	#[serde(default)]
	place_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
	location: LatLngLiteral,
}

#[derive(Debug, Deserialize)]
struct LatLngLiteral {
	lat: f64,
	lng: f64,
}

/// Geocoder backed by `maps/api/geocode/json`
#[derive(Debug)]
pub struct GoogleGeocodingAdapter {
	info: ProviderInfo,
	endpoint: String,
	api_key: SecretString,
	timeout_ms: u64,
	cache: ClientCache,
}

impl GoogleGeocodingAdapter {
	pub fn new(endpoint: &str, api_key: SecretString, timeout_ms: u64) -> ProviderResult<Self> {
		Self::with_cache(endpoint, api_key, timeout_ms, ClientCache::new())
	}

	pub fn with_cache(
		endpoint: &str,
		api_key: SecretString,
		timeout_ms: u64,
		cache: ClientCache,
	) -> ProviderResult<Self> {
		if api_key.is_empty() {
			return Err(ProviderError::MissingApiKey {
				provider_id: GOOGLE_GEOCODING_PROVIDER_ID.to_string(),
			});
		}
		// Fail fast on a malformed endpoint
		build_url(endpoint, "", &[])?;

		Ok(Self {
			info: ProviderInfo::new(GOOGLE_GEOCODING_PROVIDER_ID, "Google Geocoding", "v1")
				.with_description("Address lookup via the Google Maps Geocoding API"),
			endpoint: endpoint.to_string(),
			api_key,
			timeout_ms,
			cache,
		})
	}

	fn into_address(query: &str, response: GeocodeResponse) -> ProviderResult<GeocodedAddress> {
		match response.status.as_str() {
			"OK" => {},
			"ZERO_RESULTS" => {
				return Err(ProviderError::NotFound {
					query: query.to_string(),
				})
			},
			_ => {
				return Err(ProviderError::ApiError {
					status: response.status,
					message: response.error_message.unwrap_or_default(),
				})
			},
		}

		let first = response
			.results
			.into_iter()
			.next()
			.ok_or_else(|| ProviderError::NotFound {
				query: query.to_string(),
			})?;
		let location = LatLng::new(first.geometry.location.lat, first.geometry.location.lng);
		if !location.is_valid() {
			return Err(ProviderError::InvalidResponse {
				reason: format!(
					"coordinates out of range: {}, {}",
					location.latitude, location.longitude
				),
			});
		}

		Ok(GeocodedAddress {
			formatted_address: first.formatted_address,
			location,
			place_id: first.place_id,
		})
	}
}

#[async_trait]
impl GeocodingProvider for GoogleGeocodingAdapter {
	fn provider_info(&self) -> &ProviderInfo {
		&self.info
	}

	async fn geocode(&self, address: &str) -> ProviderResult<GeocodedAddress> {
		let url = build_url(
			&self.endpoint,
			"",
			&[
				("address", address.to_string()),
				("key", self.api_key.expose_secret().to_string()),
			],
		)?;
		let client = self.cache.get_client(&ClientConfig::new(
			self.id(),
			&self.endpoint,
			self.timeout_ms,
		))?;

		debug!("Geocoding address ({} chars)", address.len());
		let response: GeocodeResponse = get_json(&client, url, self.timeout_ms).await?;
		let geocoded = Self::into_address(address, response)?;
		info!(
			"Geocoded to {:.5}, {:.5}",
			geocoded.location.latitude, geocoded.location.longitude
		);
		Ok(geocoded)
	}
}
