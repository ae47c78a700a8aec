use axum::{extract::State, http::StatusCode, response::Json};
use solar_types::{LeadAcknowledgement, LeadRequest};

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{lead_failure, ApiFailure};
use crate::state::AppState;

/// Submit a lead for a previously issued quote
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/leads",
	request_body = LeadRequest,
	responses(
		(status = 201, description = "Lead recorded", body = LeadAcknowledgement),
		(status = 400, description = "Invalid contact details or tampered quote", body = ErrorResponse),
		(status = 500, description = "Internal error", body = ErrorResponse)
	),
	tag = "leads"
))]
/// POST /api/v1/leads - Record a lead
pub async fn post_leads(
	State(state): State<AppState>,
	Json(request): Json<LeadRequest>,
) -> Result<(StatusCode, Json<LeadAcknowledgement>), ApiFailure> {
	let ack = state
		.lead_service
		.acknowledge(request, None)
		.await
		.map_err(lead_failure)?;
	Ok((StatusCode::CREATED, Json(ack)))
}
