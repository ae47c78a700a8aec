//! Wizard session handlers
use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::Json,
};
use serde::Deserialize;
use solar_service::{EnergyInput, SystemInput};
use solar_types::{
	ContactInfo, Interest, LatLng, LeadAcknowledgement, MapView, PanelType, QuoteSession,
	RoofType, WarrantyTier, WizardStep,
};
use tracing::{debug, info};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{validation_error, wizard_failure, ApiFailure};
use crate::handlers::geocode::AddressRequest;
use crate::state::AppState;

/// Step two body
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EnergyRequest {
	#[serde(default)]
	pub monthly_bill: Option<f64>,
	#[serde(default)]
	pub monthly_usage_kwh: Option<f64>,
	#[serde(default)]
	pub roof_type: RoofType,
	#[serde(default)]
	pub interest: Option<Interest>,
}

impl From<EnergyRequest> for EnergyInput {
	fn from(request: EnergyRequest) -> Self {
		Self {
			monthly_bill: request.monthly_bill,
			monthly_usage_kwh: request.monthly_usage_kwh,
			roof_type: request.roof_type,
			interest: request.interest,
		}
	}
}

/// Step three body
#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SystemRequest {
	#[serde(default)]
	pub system_size_kw: Option<f64>,
	#[serde(default)]
	pub panel_type: PanelType,
	#[serde(default)]
	pub warranty: WarrantyTier,
	#[serde(default)]
	pub battery: bool,
}

impl From<SystemRequest> for SystemInput {
	fn from(request: SystemRequest) -> Self {
		Self {
			system_size_kw: request.system_size_kw,
			panel_type: request.panel_type,
			warranty: request.warranty,
			battery: request.battery,
		}
	}
}

#[derive(Debug, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct BackRequest {
	pub step: WizardStep,
}

/// Start a wizard session
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions",
	responses(
		(status = 201, description = "Session started", body = QuoteSession),
		(status = 500, description = "Internal error", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn create_session(
	State(state): State<AppState>,
) -> Result<(StatusCode, Json<QuoteSession>), ApiFailure> {
	let session = state
		.wizard_service
		.start_session()
		.await
		.map_err(wizard_failure)?;
	Ok((StatusCode::CREATED, Json(session)))
}

/// Current wizard state
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/api/v1/sessions/{id}",
	params(("id" = String, Path, description = "Session ID")),
	responses(
		(status = 200, description = "Session", body = QuoteSession),
		(status = 404, description = "Session not found or expired", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn get_session(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	debug!("Fetching session {}", id);
	state
		.wizard_service
		.get_session(&id)
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Step one: locate the address
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions/{id}/address",
	params(("id" = String, Path, description = "Session ID")),
	request_body = AddressRequest,
	responses(
		(status = 200, description = "Address located, session on the energy step", body = QuoteSession),
		(status = 400, description = "Empty address", body = ErrorResponse),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 422, description = "Address not found", body = ErrorResponse),
		(status = 502, description = "Geocoding provider failed", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn post_address(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<AddressRequest>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	let session = state
		.wizard_service
		.submit_address(&id, &request.address)
		.await
		.map_err(wizard_failure)?;
	info!("Session {} located at {}", id, session.data.address);
	Ok(Json(session))
}

/// Step two: energy usage
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions/{id}/energy",
	params(("id" = String, Path, description = "Session ID")),
	request_body = EnergyRequest,
	responses(
		(status = 200, description = "Session on the system step", body = QuoteSession),
		(status = 400, description = "Invalid energy data", body = ErrorResponse),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 409, description = "Address step not completed", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn post_energy(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<EnergyRequest>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	state
		.wizard_service
		.submit_energy(&id, request.into())
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Step three: system configuration
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions/{id}/system",
	params(("id" = String, Path, description = "Session ID")),
	request_body = SystemRequest,
	responses(
		(status = 200, description = "Session on the quote step", body = QuoteSession),
		(status = 400, description = "Invalid system configuration", body = ErrorResponse),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 409, description = "Energy step not completed", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn post_system(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<SystemRequest>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	state
		.wizard_service
		.configure_system(&id, request.into())
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Return to an earlier step
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions/{id}/back",
	params(("id" = String, Path, description = "Session ID")),
	request_body = BackRequest,
	responses(
		(status = 200, description = "Session moved back", body = QuoteSession),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 409, description = "Target step is not behind the current one", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn post_back(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(request): Json<BackRequest>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	state
		.wizard_service
		.go_back(&id, request.step)
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Map view for the session's location
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/api/v1/sessions/{id}/map",
	params(("id" = String, Path, description = "Session ID")),
	responses(
		(status = 200, description = "Map view", body = MapView),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 409, description = "Address not located yet", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn get_map(
	State(state): State<AppState>,
	Path(id): Path<String>,
) -> Result<Json<MapView>, ApiFailure> {
	state
		.wizard_service
		.map_view(&id)
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Drag a panel marker
#[cfg_attr(feature = "openapi", utoipa::path(
	put,
	path = "/api/v1/sessions/{id}/panels/{index}",
	params(
		("id" = String, Path, description = "Session ID"),
		("index" = u32, Path, description = "Panel index")
	),
	request_body = LatLng,
	responses(
		(status = 200, description = "Panel moved", body = QuoteSession),
		(status = 400, description = "Invalid position", body = ErrorResponse),
		(status = 404, description = "Session or panel not found", body = ErrorResponse),
		(status = 409, description = "Session not on the quote step", body = ErrorResponse),
		(status = 422, description = "Position breaks spacing or radius", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn put_panel(
	State(state): State<AppState>,
	Path((id, index)): Path<(String, u32)>,
	Json(position): Json<LatLng>,
) -> Result<Json<QuoteSession>, ApiFailure> {
	if !position.is_valid() {
		return Err(validation_error(format!(
			"Invalid coordinates: latitude {}, longitude {}",
			position.latitude, position.longitude
		)));
	}
	state
		.wizard_service
		.move_panel(&id, index, position)
		.await
		.map(Json)
		.map_err(wizard_failure)
}

/// Submit contact details for the session's quote
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/sessions/{id}/contact",
	params(("id" = String, Path, description = "Session ID")),
	request_body = ContactInfo,
	responses(
		(status = 201, description = "Lead recorded", body = LeadAcknowledgement),
		(status = 400, description = "Invalid contact details", body = ErrorResponse),
		(status = 404, description = "Session not found", body = ErrorResponse),
		(status = 409, description = "No quote to attach", body = ErrorResponse)
	),
	tag = "sessions"
))]
pub async fn post_contact(
	State(state): State<AppState>,
	Path(id): Path<String>,
	Json(contact): Json<ContactInfo>,
) -> Result<(StatusCode, Json<LeadAcknowledgement>), ApiFailure> {
	let ack = state
		.wizard_service
		.submit_contact(&id, contact)
		.await
		.map_err(wizard_failure)?;
	info!("Session {} produced lead {}", id, ack.lead_id);
	Ok((StatusCode::CREATED, Json(ack)))
}
