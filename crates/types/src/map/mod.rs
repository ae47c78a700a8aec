//! Panel layouts and the map view model handed to the client-side map

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::building::ImageryDate;
use crate::models::LatLng;

/// One placed panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PanelMarker {
	pub id: u32,
	pub location: LatLng,
	#[serde(default)]
	pub yearly_energy_kwh: Option<f64>,
	#[serde(default)]
	pub segment_index: Option<u32>,
}

/// Placed panels around a building centre, with the rules they were placed under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PanelLayout {
	pub center: LatLng,
	pub panels: Vec<PanelMarker>,
	pub min_spacing_m: f64,
	pub max_radius_m: f64,
}

/// A raster overlay the map can toggle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct OverlayLayer {
	pub id: String,
	pub name: String,
	pub url: String,
	pub opacity: f64,
	pub visible: bool,
}

/// A marker the user can drag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
	pub id: u32,
	pub position: LatLng,
	pub draggable: bool,
	#[serde(default)]
	pub label: Option<String>,
}

/// Everything the map widget needs to draw a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MapView {
	pub center: LatLng,
	pub zoom: u8,
	pub map_type: String,
	pub overlays: Vec<OverlayLayer>,
	pub markers: Vec<MapMarker>,
	#[serde(default)]
	pub imagery_date: Option<ImageryDate>,
}
