use axum::{extract::State, response::Json};
use solar_types::{QuoteData, SolarQuote};
use tracing::info;

#[cfg(feature = "openapi")]
use crate::handlers::common::ErrorResponse;
use crate::handlers::common::{quote_failure, ApiFailure};
use crate::state::AppState;

/// Price a system without going through the wizard
#[cfg_attr(feature = "openapi", utoipa::path(
	post,
	path = "/api/v1/quotes",
	request_body = QuoteData,
	responses(
		(status = 200, description = "Signed quote", body = SolarQuote),
		(status = 400, description = "Invalid quote data", body = ErrorResponse),
		(status = 500, description = "Internal error", body = ErrorResponse)
	),
	tag = "quotes"
))]
/// POST /api/v1/quotes - Calculate a quote
pub async fn post_quotes(
	State(state): State<AppState>,
	Json(data): Json<QuoteData>,
) -> Result<Json<SolarQuote>, ApiFailure> {
	let quote = state.quote_service.create_quote(&data).map_err(quote_failure)?;
	info!(
		"Returning quote {} ({} kW, {} panels)",
		quote.quote_id, quote.system.system_size_kw, quote.system.panel_count
	);
	Ok(Json(quote))
}
