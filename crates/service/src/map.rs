//! Map view model for the client-side map widget

use solar_types::{DataLayers, LatLng, MapMarker, MapView, OverlayLayer, QuoteSession};

/// Satellite zoom that shows a single roof
pub const DEFAULT_ZOOM: u8 = 20;
pub const MAP_TYPE: &str = "satellite";

fn overlay(id: &str, name: &str, url: &Option<String>, opacity: f64, visible: bool) -> Option<OverlayLayer> {
	url.as_ref().map(|url| OverlayLayer {
		id: id.to_string(),
		name: name.to_string(),
		url: url.clone(),
		opacity,
		visible,
	})
}

/// Overlays for the layers the API returned URLs for
pub fn overlays(layers: &DataLayers) -> Vec<OverlayLayer> {
	[
		overlay("rgb", "Aerial imagery", &layers.rgb_url, 1.0, false),
		overlay("mask", "Roof mask", &layers.mask_url, 0.5, false),
		overlay("annualFlux", "Annual sunshine", &layers.annual_flux_url, 0.6, true),
		overlay("monthlyFlux", "Monthly sunshine", &layers.monthly_flux_url, 0.6, false),
		overlay("dsm", "Surface elevation", &layers.dsm_url, 0.5, false),
	]
	.into_iter()
	.flatten()
	.collect()
}

/// Centre the map on the building, else on the geocoded address
pub fn map_center(session: &QuoteSession) -> Option<LatLng> {
	session
		.data
		.building
		.as_ref()
		.and_then(|building| building.center)
		.or(session.data.location)
}

/// Build the view for a session. `None` until the address has been located.
pub fn build_map_view(session: &QuoteSession, layers: Option<&DataLayers>) -> Option<MapView> {
	let center = map_center(session)?;

	let markers = session
		.layout
		.as_ref()
		.map(|layout| {
			layout
				.panels
				.iter()
				.map(|panel| MapMarker {
					id: panel.id,
					position: panel.location,
					draggable: true,
					label: Some(format!("Panel {}", panel.id + 1)),
				})
				.collect()
		})
		.unwrap_or_default();

	Some(MapView {
		center,
		zoom: DEFAULT_ZOOM,
		map_type: MAP_TYPE.to_string(),
		overlays: layers.map(overlays).unwrap_or_default(),
		markers,
		imagery_date: layers.and_then(|layers| layers.imagery_date),
	})
}
