//! Google Solar API client (`buildingInsights:findClosest`, `dataLayers:get`)

use async_trait::async_trait;
use serde::Deserialize;
use solar_types::constants::providers::GOOGLE_SOLAR_PROVIDER_ID;
use solar_types::{
	BuildingData, DataLayers, LatLng, ProviderError, ProviderInfo, ProviderResult, RoofSegment,
	SecretString, SolarDataProvider, SolarPanel, SolarPotential,
};
use tracing::{debug, info};

use crate::client_cache::{ClientCache, ClientConfig};
use crate::http::{build_url, get_json};

pub const DEFAULT_SOLAR_ENDPOINT: &str = "https://solar.googleapis.com/v1";

/// Imagery quality requested from the API
const REQUIRED_QUALITY: &str = "MEDIUM";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildingInsightsResponse {
	#[serde(default)]
	center: Option<LatLng>,
	#[serde(default)]
	imagery_quality: Option<String>,
	solar_potential: ApiSolarPotential,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSolarPotential {
	#[serde(default)]
	max_array_panels_count: u32,
	#[serde(default)]
	max_sunshine_hours_per_year: Option<f64>,
	#[serde(default)]
	carbon_offset_factor_kg_per_mwh: f64,
	#[serde(default)]
	panel_capacity_watts: f64,
	#[serde(default)]
	panel_height_meters: Option<f64>,
	#[serde(default)]
	panel_width_meters: Option<f64>,
	#[serde(default)]
	roof_segment_stats: Vec<ApiRoofSegment>,
	#[serde(default)]
	solar_panels: Vec<SolarPanel>,
	#[serde(default)]
	solar_panel_configs: Vec<ApiPanelConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRoofSegment {
	#[serde(default)]
	pitch_degrees: f64,
	#[serde(default)]
	azimuth_degrees: f64,
	stats: ApiSegmentStats,
	#[serde(default)]
	center: Option<LatLng>,
	#[serde(default)]
	plane_height_at_center_meters: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSegmentStats {
	#[serde(default)]
	ground_area_meters2: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPanelConfig {
	panels_count: u32,
	yearly_energy_dc_kwh: f64,
}

impl BuildingInsightsResponse {
	fn into_building_data(self) -> ProviderResult<BuildingData> {
		let potential = self.solar_potential;
		if potential.panel_capacity_watts <= 0.0 {
			return Err(ProviderError::InvalidResponse {
				reason: "solarPotential.panelCapacityWatts missing".to_string(),
			});
		}

		// Energy of the largest configuration; fall back to summing panels
		let yearly_energy_dc_kwh = potential
			.solar_panel_configs
			.iter()
			.max_by_key(|config| config.panels_count)
			.map(|config| config.yearly_energy_dc_kwh)
			.unwrap_or_else(|| {
				potential
					.solar_panels
					.iter()
					.map(|panel| panel.yearly_energy_dc_kwh)
					.sum()
			});

		let roof_segments = potential
			.roof_segment_stats
			.into_iter()
			.map(|segment| RoofSegment {
				pitch_degrees: segment.pitch_degrees,
				azimuth_degrees: segment.azimuth_degrees,
				ground_area_meters2: segment.stats.ground_area_meters2,
				height_meters: segment.plane_height_at_center_meters,
				center: segment.center,
			})
			.collect();

		Ok(BuildingData {
			roof_segments,
			solar_potential: SolarPotential {
				max_array_panels_count: potential.max_array_panels_count,
				yearly_energy_dc_kwh,
				carbon_offset_factor_kg_per_mwh: potential.carbon_offset_factor_kg_per_mwh,
				panel_capacity_watts: potential.panel_capacity_watts,
				panel_height_meters: potential.panel_height_meters,
				panel_width_meters: potential.panel_width_meters,
				max_sunshine_hours_per_year: potential.max_sunshine_hours_per_year,
			},
			center: self.center,
			solar_panels: potential.solar_panels,
			imagery_quality: self.imagery_quality,
		})
	}
}

/// Building insights and imagery from the Google Solar API
#[derive(Debug)]
pub struct GoogleSolarAdapter {
	info: ProviderInfo,
	endpoint: String,
	api_key: SecretString,
	timeout_ms: u64,
	cache: ClientCache,
}

impl GoogleSolarAdapter {
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
				provider_id: GOOGLE_SOLAR_PROVIDER_ID.to_string(),
			});
		}
		build_url(endpoint, "", &[])?;

		Ok(Self {
			info: ProviderInfo::new(GOOGLE_SOLAR_PROVIDER_ID, "Google Solar", "v1")
				.with_description("Roof segments, solar potential and imagery layers"),
			endpoint: endpoint.to_string(),
			api_key,
			timeout_ms,
			cache,
		})
	}

	fn location_params(&self, location: &LatLng) -> Vec<(&'static str, String)> {
		vec![
			("location.latitude", location.latitude.to_string()),
			("location.longitude", location.longitude.to_string()),
			("requiredQuality", REQUIRED_QUALITY.to_string()),
			("key", self.api_key.expose_secret().to_string()),
		]
	}

	fn client(&self) -> ProviderResult<std::sync::Arc<reqwest::Client>> {
		self.cache.get_client(&ClientConfig::new(
			self.id(),
			&self.endpoint,
			self.timeout_ms,
		))
	}
}

#[async_trait]
impl SolarDataProvider for GoogleSolarAdapter {
	fn provider_info(&self) -> &ProviderInfo {
		&self.info
	}

	async fn building_insights(&self, location: &LatLng) -> ProviderResult<BuildingData> {
		let url = build_url(
			&self.endpoint,
			"buildingInsights:findClosest",
			&self.location_params(location),
		)?;
		debug!(
			"Fetching building insights near {:.5}, {:.5}",
			location.latitude, location.longitude
		);

		let response: BuildingInsightsResponse =
			get_json(&*self.client()?, url, self.timeout_ms).await?;
		let building = response.into_building_data()?;
		info!(
			"Building insights: {} segments, {} candidate panels",
			building.roof_segments.len(),
			building.solar_panels.len()
		);
		Ok(building)
	}

	async fn data_layers(&self, location: &LatLng, radius_meters: f64) -> ProviderResult<DataLayers> {
		let mut params = self.location_params(location);
		params.push(("radiusMeters", radius_meters.to_string()));
		params.push(("view", "FULL_LAYERS".to_string()));
		let url = build_url(&self.endpoint, "dataLayers:get", &params)?;

		// The dataLayers payload already uses our field names
		get_json(&*self.client()?, url, self.timeout_ms).await
	}
}
