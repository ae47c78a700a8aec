//! Building insights and imagery layers as returned by the solar API.
//!
//! The field names follow the API's camelCase JSON so that provider
//! responses and the local mock endpoint share one shape. Optional fields
//! are only present when the live API supplies them.

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::models::LatLng;

/// One planar roof segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RoofSegment {
	pub pitch_degrees: f64,
	pub azimuth_degrees: f64,
	pub ground_area_meters2: f64,
	pub height_meters: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub center: Option<LatLng>,
}

/// Aggregate solar potential of the whole building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SolarPotential {
	pub max_array_panels_count: u32,
	/// DC energy of the maximum array per year
	pub yearly_energy_dc_kwh: f64,
	pub carbon_offset_factor_kg_per_mwh: f64,
	pub panel_capacity_watts: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub panel_height_meters: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub panel_width_meters: Option<f64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_sunshine_hours_per_year: Option<f64>,
}

/// A candidate panel position suggested by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SolarPanel {
	pub center: LatLng,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub orientation: Option<String>,
	#[serde(default)]
	pub yearly_energy_dc_kwh: f64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub segment_index: Option<u32>,
}

/// Roof and solar metadata for one building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BuildingData {
	#[serde(default)]
	pub roof_segments: Vec<RoofSegment>,
	pub solar_potential: SolarPotential,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub center: Option<LatLng>,
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub solar_panels: Vec<SolarPanel>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub imagery_quality: Option<String>,
}

impl BuildingData {
	/// Sum of all segment ground areas
	pub fn total_ground_area_m2(&self) -> f64 {
		self.roof_segments
			.iter()
			.map(|s| s.ground_area_meters2)
			.sum()
	}

	/// Capacity of the largest array the roof can hold, if known
	pub fn max_capacity_kw(&self) -> Option<f64> {
		let potential = &self.solar_potential;
		let kw = f64::from(potential.max_array_panels_count) * potential.panel_capacity_watts / 1000.0;
		(kw > 0.0 && kw.is_finite()).then_some(kw)
	}

	/// Yearly kWh produced per installed kW at this site
	pub fn production_factor(&self) -> Option<f64> {
		let capacity = self.max_capacity_kw()?;
		let factor = self.solar_potential.yearly_energy_dc_kwh / capacity;
		(factor > 0.0 && factor.is_finite()).then_some(factor)
	}
}

/// Capture date of the aerial imagery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ImageryDate {
	pub year: i32,
	pub month: u32,
	pub day: u32,
}

/// Raster overlays for the map
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DataLayers {
	#[serde(default)]
	pub imagery_date: Option<ImageryDate>,
	#[serde(default)]
	pub imagery_quality: Option<String>,
	#[serde(default)]
	pub rgb_url: Option<String>,
	#[serde(default)]
	pub mask_url: Option<String>,
	#[serde(default)]
	pub dsm_url: Option<String>,
	#[serde(default)]
	pub annual_flux_url: Option<String>,
	#[serde(default)]
	pub monthly_flux_url: Option<String>,
	#[serde(default)]
	pub hourly_shade_urls: Vec<String>,
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample() -> BuildingData {
		serde_json::from_value(serde_json::json!({
			"roofSegments": [
				{"pitchDegrees": 25, "azimuthDegrees": 180, "groundAreaMeters2": 80, "heightMeters": 3},
				{"pitchDegrees": 25, "azimuthDegrees": 0, "groundAreaMeters2": 80, "heightMeters": 3}
			],
			"solarPotential": {
				"maxArrayPanelsCount": 20,
				"yearlyEnergyDcKwh": 8500,
				"carbonOffsetFactorKgPerMwh": 0.7,
				"panelCapacityWatts": 400
			}
		}))
		.unwrap()
	}

	#[test]
	fn test_derived_figures() {
		let building = sample();
		assert_eq!(building.total_ground_area_m2(), 160.0);
		assert_eq!(building.max_capacity_kw(), Some(8.0));
		assert_eq!(building.production_factor(), Some(1062.5));
	}

	#[test]
	fn test_zero_capacity_has_no_factor() {
		let mut building = sample();
		building.solar_potential.max_array_panels_count = 0;
		assert_eq!(building.max_capacity_kw(), None);
		assert_eq!(building.production_factor(), None);
	}

	#[test]
	fn test_optional_fields_are_omitted_on_output() {
		let json = serde_json::to_value(sample()).unwrap();
		assert!(json.get("center").is_none());
		assert!(json.get("solarPanels").is_none());
		assert!(json["solarPotential"].get("panelHeightMeters").is_none());
		assert_eq!(json["roofSegments"][0]["groundAreaMeters2"], 80.0);
	}
}
