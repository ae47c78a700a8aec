//! Local stand-in for the solar API
//!
//! Serves a fixed two-segment building after a short delay so the wizard
//! and its clients can run without an API key.

use axum::{body::Bytes, extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use solar_types::{BuildingData, LatLng};
use tracing::{debug, warn};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

pub const MISSING_COORDINATES_MESSAGE: &str = "Latitude and longitude are required";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch solar data";

/// Error body of the mock endpoint: `{"error": "..."}`
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct SolarDataError {
	pub error: String,
}

fn failure(status: StatusCode, message: &str) -> (StatusCode, Json<SolarDataError>) {
	(
		status,
		Json(SolarDataError {
			error: message.to_string(),
		}),
	)
}

/// Numeric, finite and in range, or nothing
fn parse_coordinates(body: &Value) -> Option<LatLng> {
	let latitude = body.get("latitude")?.as_f64()?;
	let longitude = body.get("longitude")?.as_f64()?;
	let location = LatLng::new(latitude, longitude);
	location.is_valid().then_some(location)
}

/// POST /api/solar-data - Mocked building insights
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/solar-data",
	request_body = LatLng,
	responses(
		(status = 200, description = "Mocked building data", body = BuildingData),
		(status = 400, description = "Missing or invalid coordinates", body = SolarDataError),
		(status = 500, description = "Internal error", body = SolarDataError)
	),
	tag = "solar"
))]
pub async fn post_solar_data(
	State(state): State<AppState>,
	body: Bytes,
) -> Result<Json<BuildingData>, (StatusCode, Json<SolarDataError>)> {
	let body: Value = serde_json::from_slice(&body).map_err(|e| {
		warn!("Unreadable solar-data request body: {}", e);
		failure(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
	})?;

	let location = parse_coordinates(&body)
		.ok_or_else(|| failure(StatusCode::BAD_REQUEST, MISSING_COORDINATES_MESSAGE))?;
	debug!(
		"Serving mock building data for {}, {}",
		location.latitude, location.longitude
	);

	state
		.mock_solar_provider
		.building_insights(&location)
		.await
		.map(Json)
		.map_err(|e| {
			warn!("Mock solar provider failed: {}", e);
			failure(StatusCode::INTERNAL_SERVER_ERROR, FETCH_FAILED_MESSAGE)
		})
}
