use axum::{extract::State, response::Json};
use serde::Deserialize;
use solar_types::{GeocodedAddress, QuoteData};
use tracing::info;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{geocoding_failure, validation_error, ApiFailure};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AddressRequest {
	pub address: String,
}

/// Resolve an address to coordinates
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/geocode",
	request_body = AddressRequest,
	responses(
		(status = 200, description = "Address located", body = GeocodedAddress),
		(status = 400, description = "Empty address", body = ErrorResponse),
		(status = 422, description = "No match for the address", body = ErrorResponse),
		(status = 502, description = "Geocoding provider failed", body = ErrorResponse)
	),
	tag = "geocoding"
))]
/// POST /api/v1/geocode - Geocode an address
pub async fn post_geocode(
	State(state): State<AppState>,
	Json(request): Json<AddressRequest>,
) -> Result<Json<GeocodedAddress>, ApiFailure> {
	QuoteData::validate_address(&request.address).map_err(|e| validation_error(e.to_string()))?;

	let geocoded = state
		.geocoder
		.geocode(request.address.trim())
		.await
		.map_err(|e| geocoding_failure(&e))?;
	info!(
		"Geocoded address via {} to {}, {}",
		state.geocoder.id(),
		geocoded.location.latitude,
		geocoded.location.longitude
	);
	Ok(Json(geocoded))
}
