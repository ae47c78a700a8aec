//! Demo building-data provider
//!
//! Serves one fixed building record after a simulated delay. Used when no
//! live solar API is configured and as the fallback when the live API fails.

use async_trait::async_trait;
use solar_types::constants::limits::DEFAULT_MOCK_DELAY_MS;
use solar_types::constants::providers::MOCK_SOLAR_PROVIDER_ID;
use solar_types::{
	BuildingData, LatLng, ProviderError, ProviderInfo, ProviderResult, RoofSegment,
	SolarDataProvider, SolarPotential,
};
use std::time::Duration;
use tracing::debug;

/// The fixed demo record: two opposing 80 m² roof planes, a 20 panel array
pub fn mock_building_data() -> BuildingData {
	let segment = |azimuth_degrees: f64| RoofSegment {
		pitch_degrees: 25.0,
		azimuth_degrees,
		ground_area_meters2: 80.0,
		height_meters: 3.0,
		center: None,
	};

	BuildingData {
		roof_segments: vec![segment(180.0), segment(0.0)],
		solar_potential: SolarPotential {
			max_array_panels_count: 20,
			yearly_energy_dc_kwh: 8500.0,
			carbon_offset_factor_kg_per_mwh: 0.7,
			panel_capacity_watts: 400.0,
			panel_height_meters: None,
			panel_width_meters: None,
			max_sunshine_hours_per_year: None,
		},
		center: None,
		solar_panels: Vec::new(),
		imagery_quality: None,
	}
}

#[derive(Debug)]
pub struct MockSolarProvider {
	info: ProviderInfo,
	delay: Duration,
}

impl MockSolarProvider {
	pub fn new(delay: Duration) -> Self {
		Self {
			info: ProviderInfo::new(MOCK_SOLAR_PROVIDER_ID, "Mock Solar Data", "1.0.0")
				.with_description("Fixed demo building record"),
			delay,
		}
	}

	/// Provider without the simulated latency
	pub fn instant() -> Self {
		Self::new(Duration::ZERO)
	}

	pub fn delay(&self) -> Duration {
		self.delay
	}
}

impl Default for MockSolarProvider {
	fn default() -> Self {
		Self::new(Duration::from_millis(DEFAULT_MOCK_DELAY_MS))
	}
}

#[async_trait]
impl SolarDataProvider for MockSolarProvider {
	fn provider_info(&self) -> &ProviderInfo {
		&self.info
	}

	async fn building_insights(&self, location: &LatLng) -> ProviderResult<BuildingData> {
		if !location.is_valid() {
			return Err(ProviderError::InvalidResponse {
				reason: "Latitude and longitude are required".to_string(),
			});
		}
		debug!("Serving mock building data after {:?}", self.delay);
		if !self.delay.is_zero() {
			tokio::time::sleep(self.delay).await;
		}

		Ok(mock_building_data())
	}
}
