//! Geographic coordinates and geocoding results

use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Mean Earth radius used for local projections, in metres
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;

/// A WGS84 coordinate pair
///
/// Serialized as `{"latitude": .., "longitude": ..}`, the shape used by the
/// solar API and the local mock endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct LatLng {
	pub latitude: f64,
	pub longitude: f64,
}

impl LatLng {
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self {
			latitude,
			longitude,
		}
	}

	/// Finite and inside the usual latitude/longitude ranges
	pub fn is_valid(&self) -> bool {
		self.latitude.is_finite()
			&& self.longitude.is_finite()
			&& (-90.0..=90.0).contains(&self.latitude)
			&& (-180.0..=180.0).contains(&self.longitude)
	}

	/// Equirectangular projection of `self` relative to `origin`.
	///
	/// Returns `(east, north)` in metres. Accurate to well under a centimetre
	/// at rooftop scale, which is all panel placement needs.
	pub fn to_local_meters(&self, origin: &LatLng) -> (f64, f64) {
		let lat0 = origin.latitude.to_radians();
		let east =
			(self.longitude - origin.longitude).to_radians() * EARTH_RADIUS_M * lat0.cos();
		let north = (self.latitude - origin.latitude).to_radians() * EARTH_RADIUS_M;
		(east, north)
	}

	/// Inverse of [`LatLng::to_local_meters`]
	pub fn from_local_meters(origin: &LatLng, east: f64, north: f64) -> Self {
		let lat0 = origin.latitude.to_radians();
		let latitude = origin.latitude + (north / EARTH_RADIUS_M).to_degrees();
		let longitude = origin.longitude + (east / (EARTH_RADIUS_M * lat0.cos())).to_degrees();
		Self {
			latitude,
			longitude,
		}
	}
}

/// Result of a successful geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GeocodedAddress {
	pub formatted_address: String,
	pub location: LatLng,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub place_id: Option<String>,
}
