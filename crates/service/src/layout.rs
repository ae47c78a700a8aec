//! Panel placement
//!
//! Candidates are projected to a local metric plane around the building
//! centre and accepted greedily, best yield first, while keeping every pair
//! of panels at least `min_spacing_m` apart and inside `max_radius_m`.

use solar_types::{BuildingData, LatLng, LayoutConfig, PanelLayout, PanelMarker};
use thiserror::Error;

/// Slack for projection round-off when comparing distances
const DISTANCE_EPSILON_M: f64 = 1e-6;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LayoutError {
	#[error("Panel {index} would be {distance_m:.2}m from panel {other}, minimum is {min_spacing_m}m")]
	TooClose {
		index: u32,
		other: u32,
		distance_m: f64,
		min_spacing_m: f64,
	},

	#[error("Panel {index} would be {distance_m:.2}m from the building centre, limit is {max_radius_m}m")]
	OutOfBounds {
		index: u32,
		distance_m: f64,
		max_radius_m: f64,
	},

	#[error("No panel with index {index}")]
	UnknownPanel { index: u32 },

	#[error("Invalid coordinates: {latitude}, {longitude}")]
	InvalidPosition { latitude: f64, longitude: f64 },
}

/// A position a panel may be placed at
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
	pub location: LatLng,
	pub yearly_energy_kwh: Option<f64>,
	pub segment_index: Option<u32>,
}

fn distance_m(a: (f64, f64), b: (f64, f64)) -> f64 {
	((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

/// Candidate positions for a building: the API's own panel positions when
/// it has any, otherwise a grid around `center`.
pub fn candidates_for(
	building: Option<&BuildingData>,
	center: &LatLng,
	target_count: u32,
	config: &LayoutConfig,
	panel_size_m: (f64, f64),
) -> Vec<Candidate> {
	match building {
		Some(building) if !building.solar_panels.is_empty() => building
			.solar_panels
			.iter()
			.map(|panel| Candidate {
				location: panel.center,
				yearly_energy_kwh: Some(panel.yearly_energy_dc_kwh),
				segment_index: panel.segment_index,
			})
			.collect(),
		_ => grid_candidates(center, target_count, config, panel_size_m),
	}
}

/// Square grid centred on `center` with a pitch of at least the minimum
/// spacing in each direction, trimmed to the allowed radius
pub fn grid_candidates(
	center: &LatLng,
	target_count: u32,
	config: &LayoutConfig,
	(panel_height_m, panel_width_m): (f64, f64),
) -> Vec<Candidate> {
	let pitch_east = panel_height_m.max(config.min_spacing_m);
	let pitch_north = panel_width_m.max(config.min_spacing_m);
	let side = (f64::from(target_count).sqrt().ceil() as i64 + 2).max(1);
	let half = side / 2;

	let mut cells: Vec<(f64, f64)> = Vec::new();
	for row in -half..=half {
		for col in -half..=half {
			let cell = (col as f64 * pitch_east, row as f64 * pitch_north);
			if distance_m(cell, (0.0, 0.0)) <= config.max_radius_m {
				cells.push(cell);
			}
		}
	}
	cells.sort_by(|a, b| distance_m(*a, (0.0, 0.0)).total_cmp(&distance_m(*b, (0.0, 0.0))));

	cells
		.into_iter()
		.map(|(east, north)| Candidate {
			location: LatLng::from_local_meters(center, east, north),
			yearly_energy_kwh: None,
			segment_index: None,
		})
		.collect()
}

/// Greedy placement of up to `target_count` panels
pub fn place_panels(
	candidates: &[Candidate],
	center: &LatLng,
	target_count: u32,
	config: &LayoutConfig,
) -> PanelLayout {
	let mut ranked: Vec<(&Candidate, (f64, f64))> = candidates
		.iter()
		.filter(|candidate| candidate.location.is_valid())
		.map(|candidate| (candidate, candidate.location.to_local_meters(center)))
		.collect();
	// Highest yield first; nearest to the centre breaks ties
	ranked.sort_by(|(a, pa), (b, pb)| {
		let ea = a.yearly_energy_kwh.unwrap_or(0.0);
		let eb = b.yearly_energy_kwh.unwrap_or(0.0);
		eb.total_cmp(&ea)
			.then_with(|| distance_m(*pa, (0.0, 0.0)).total_cmp(&distance_m(*pb, (0.0, 0.0))))
	});

	let mut accepted: Vec<(f64, f64)> = Vec::new();
	let mut panels = Vec::new();
	for (candidate, point) in ranked {
		if panels.len() as u32 >= target_count {
			break;
		}
		if distance_m(point, (0.0, 0.0)) > config.max_radius_m + DISTANCE_EPSILON_M {
			continue;
		}
		if accepted
			.iter()
			.any(|other| distance_m(point, *other) + DISTANCE_EPSILON_M < config.min_spacing_m)
		{
			continue;
		}
		accepted.push(point);
		panels.push(PanelMarker {
			id: panels.len() as u32,
			location: candidate.location,
			yearly_energy_kwh: candidate.yearly_energy_kwh,
			segment_index: candidate.segment_index,
		});
	}

	PanelLayout {
		center: *center,
		panels,
		min_spacing_m: config.min_spacing_m,
		max_radius_m: config.max_radius_m,
	}
}

/// Move one panel, enforcing the layout's spacing and radius.
///
/// The layout is unchanged when the move is rejected.
pub fn move_panel(layout: &mut PanelLayout, index: u32, position: LatLng) -> Result<(), LayoutError> {
	if !position.is_valid() {
		return Err(LayoutError::InvalidPosition {
			latitude: position.latitude,
			longitude: position.longitude,
		});
	}
	let slot = index as usize;
	if slot >= layout.panels.len() {
		return Err(LayoutError::UnknownPanel { index });
	}

	let point = position.to_local_meters(&layout.center);
	let from_center = distance_m(point, (0.0, 0.0));
	if from_center > layout.max_radius_m + DISTANCE_EPSILON_M {
		return Err(LayoutError::OutOfBounds {
			index,
			distance_m: from_center,
			max_radius_m: layout.max_radius_m,
		});
	}

	for (other_slot, other) in layout.panels.iter().enumerate() {
		if other_slot == slot {
			continue;
		}
		let gap = distance_m(point, other.location.to_local_meters(&layout.center));
		if gap + DISTANCE_EPSILON_M < layout.min_spacing_m {
			return Err(LayoutError::TooClose {
				index,
				other: other.id,
				distance_m: gap,
				min_spacing_m: layout.min_spacing_m,
			});
		}
	}

	let panel = &mut layout.panels[slot];
	panel.location = position;
	// Yield was estimated for the old spot
	panel.yearly_energy_kwh = None;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use solar_types::SolarPanel;

	const PANEL: (f64, f64) = (1.65, 0.99);

	fn center() -> LatLng {
		LatLng::new(39.7392, -104.9903)
	}

	fn min_pairwise_gap(layout: &PanelLayout) -> f64 {
		let points: Vec<_> = layout
			.panels
			.iter()
			.map(|p| p.location.to_local_meters(&layout.center))
			.collect();
		let mut min = f64::INFINITY;
		for i in 0..points.len() {
			for j in (i + 1)..points.len() {
				min = min.min(distance_m(points[i], points[j]));
			}
		}
		min
	}

	fn candidate_at(east: f64, north: f64, energy: f64) -> Candidate {
		Candidate {
			location: LatLng::from_local_meters(&center(), east, north),
			yearly_energy_kwh: Some(energy),
			segment_index: Some(0),
		}
	}

	#[test]
	fn test_grid_layout_respects_spacing() {
		let config = LayoutConfig::default();
		let candidates = grid_candidates(&center(), 20, &config, PANEL);
		let layout = place_panels(&candidates, &center(), 20, &config);

		assert_eq!(layout.panels.len(), 20);
		assert!(min_pairwise_gap(&layout) >= config.min_spacing_m - 1e-6);
		for (i, panel) in layout.panels.iter().enumerate() {
			assert_eq!(panel.id, i as u32);
		}
	}

	#[test]
	fn test_close_candidates_are_skipped_by_yield() {
		let config = LayoutConfig::default();
		let candidates = vec![
			candidate_at(0.0, 0.0, 300.0),
			candidate_at(0.5, 0.0, 450.0),
			candidate_at(2.0, 0.0, 400.0),
			candidate_at(2.9, 0.0, 100.0),
		];
		let layout = place_panels(&candidates, &center(), 10, &config);

		let energies: Vec<f64> = layout
			.panels
			.iter()
			.filter_map(|p| p.yearly_energy_kwh)
			.collect();
		// 450 at 0.5 m wins; 300 at 0.0 is too close to it; 100 at 2.9 m is too close to 400 at 2.0 m
		assert_eq!(energies, vec![450.0, 400.0]);
	}

	#[test]
	fn test_radius_limit() {
		let config = LayoutConfig {
			min_spacing_m: 1.2,
			max_radius_m: 5.0,
		};
		let candidates = vec![candidate_at(0.0, 0.0, 100.0), candidate_at(0.0, 8.0, 900.0)];
		let layout = place_panels(&candidates, &center(), 10, &config);
		assert_eq!(layout.panels.len(), 1);
		assert_eq!(layout.panels[0].yearly_energy_kwh, Some(100.0));
	}

	#[test]
	fn test_target_count_caps_layout() {
		let config = LayoutConfig::default();
		let candidates = grid_candidates(&center(), 30, &config, PANEL);
		assert_eq!(place_panels(&candidates, &center(), 7, &config).panels.len(), 7);
		assert!(place_panels(&candidates, &center(), 0, &config).panels.is_empty());
	}

	#[test]
	fn test_building_panels_preferred_over_grid() {
		let building: BuildingData = serde_json::from_value(serde_json::json!({
			"solarPotential": {
				"maxArrayPanelsCount": 2,
				"yearlyEnergyDcKwh": 800,
				"carbonOffsetFactorKgPerMwh": 400,
				"panelCapacityWatts": 400
			}
		}))
		.unwrap();
		let config = LayoutConfig::default();
		assert_eq!(
			candidates_for(Some(&building), &center(), 4, &config, PANEL).len(),
			grid_candidates(&center(), 4, &config, PANEL).len()
		);

		let mut building = building;
		building.solar_panels = vec![SolarPanel {
			center: center(),
			orientation: Some("PORTRAIT".to_string()),
			yearly_energy_dc_kwh: 410.0,
			segment_index: Some(1),
		}];
		let candidates = candidates_for(Some(&building), &center(), 4, &config, PANEL);
		assert_eq!(candidates.len(), 1);
		assert_eq!(candidates[0].segment_index, Some(1));
	}

	#[test]
	fn test_move_panel_rules() {
		let config = LayoutConfig::default();
		let candidates = vec![candidate_at(0.0, 0.0, 400.0), candidate_at(3.0, 0.0, 300.0)];
		let mut layout = place_panels(&candidates, &center(), 2, &config);

		let too_close = LatLng::from_local_meters(&center(), 2.5, 0.0);
		assert!(matches!(
			move_panel(&mut layout, 0, too_close),
			Err(LayoutError::TooClose { index: 0, other: 1, .. })
		));

		let far = LatLng::from_local_meters(&center(), 0.0, 45.0);
		assert!(matches!(
			move_panel(&mut layout, 0, far),
			Err(LayoutError::OutOfBounds { .. })
		));
		assert_eq!(
			move_panel(&mut layout, 9, center()),
			Err(LayoutError::UnknownPanel { index: 9 })
		);

		let ok = LatLng::from_local_meters(&center(), -2.0, 1.0);
		move_panel(&mut layout, 0, ok).unwrap();
		assert_eq!(layout.panels[0].location, ok);
		assert!(min_pairwise_gap(&layout) >= config.min_spacing_m);
	}

	#[test]
	fn test_panel_can_move_onto_its_own_spot() {
		let config = LayoutConfig::default();
		let mut layout = place_panels(&[candidate_at(1.0, 1.0, 10.0)], &center(), 1, &config);
		let same = layout.panels[0].location;
		assert!(move_panel(&mut layout, 0, same).is_ok());
	}
}
