use std::collections::HashMap;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Serialize;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check endpoint
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/health",
	responses((status = 200, description = "Service healthy", body = String)),
	tag = "health"
))]
pub async fn health() -> &'static str {
	"OK"
}

/// Readiness response
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ReadinessResponse {
	pub status: String,
	pub storage_healthy: bool,
	pub providers: HashMap<String, bool>,
	pub active_sessions: usize,
	pub total_leads: usize,
}

/// GET /ready - Readiness probe with storage and provider checks
#[cfg_attr(feature = "openapi", utoipa::path(
	get,
	path = "/ready",
	responses(
		(status = 200, description = "Ready", body = ReadinessResponse),
		(status = 503, description = "Degraded", body = ReadinessResponse)
	),
	tag = "health"
))]
pub async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ReadinessResponse>) {
	let storage_healthy = state.storage.health_check().await.unwrap_or(false);
	let stats = state.storage.stats().await.unwrap_or_default();

	let mut providers = HashMap::new();
	providers.insert(
		state.geocoder.id().to_string(),
		state.geocoder.health_check().await.unwrap_or(false),
	);
	providers.insert(
		state.solar_provider.id().to_string(),
		state.solar_provider.health_check().await.unwrap_or(false),
	);
	let providers_healthy = providers.values().all(|v| *v);

	let overall = storage_healthy && providers_healthy;
	let status = if overall { "ready" } else { "degraded" };

	let body = ReadinessResponse {
		status: status.to_string(),
		storage_healthy,
		providers,
		active_sessions: stats.active_sessions,
		total_leads: stats.total_leads,
	};
	let code = if overall {
		StatusCode::OK
	} else {
		StatusCode::SERVICE_UNAVAILABLE
	};
	(code, Json(body))
}
