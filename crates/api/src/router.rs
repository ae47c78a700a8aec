use axum::{
	routing::{get, post, put},
	Router,
};
use tower::ServiceBuilder;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	limit::RequestBodyLimitLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};
use tracing::Level;

use crate::handlers::{
	create_session, get_map, get_session, health, post_address, post_back, post_contact,
	post_energy, post_geocode, post_leads, post_quotes, post_solar_data, post_system, put_panel,
	ready,
};
use crate::security::add_security_headers;
use crate::state::AppState;
// State is applied at the application level using `.with_state(...)`.
#[cfg(feature = "openapi")]
use crate::openapi::ApiDoc;
#[cfg(feature = "openapi")]
use utoipa::OpenApi;
#[cfg(feature = "openapi")]
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router() -> Router<AppState> {
	let cors = CorsLayer::permissive();
	let body_limit = RequestBodyLimitLayer::new(1024 * 1024);
	let trace = TraceLayer::new_for_http()
		.make_span_with(|req: &axum::http::Request<_>| {
			let req_id = req
				.headers()
				.get("x-request-id")
				.and_then(|v| v.to_str().ok())
				.unwrap_or("-");
			tracing::info_span!(
				"http_request",
				method = %req.method(),
				uri = %req.uri(),
				req_id
			)
		})
		.on_request(tower_http::trace::DefaultOnRequest::new().level(Level::INFO))
		.on_response(
			tower_http::trace::DefaultOnResponse::new()
				.level(Level::INFO)
				.latency_unit(tower_http::LatencyUnit::Millis),
		);
	let req_id = ServiceBuilder::new()
		.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
		.layer(PropagateRequestIdLayer::x_request_id());

	let base_router = Router::new()
		.route("/health", get(health))
		.route("/ready", get(ready))
		.route("/api/solar-data", post(post_solar_data))
		.route("/api/v1/geocode", post(post_geocode))
		.route("/api/v1/quotes", post(post_quotes))
		.route("/api/v1/leads", post(post_leads))
		.route("/api/v1/sessions", post(create_session))
		.route("/api/v1/sessions/{id}", get(get_session))
		.route("/api/v1/sessions/{id}/address", post(post_address))
		.route("/api/v1/sessions/{id}/energy", post(post_energy))
		.route("/api/v1/sessions/{id}/system", post(post_system))
		.route("/api/v1/sessions/{id}/back", post(post_back))
		.route("/api/v1/sessions/{id}/map", get(get_map))
		.route("/api/v1/sessions/{id}/panels/{index}", put(put_panel))
		.route("/api/v1/sessions/{id}/contact", post(post_contact));

	#[cfg(feature = "openapi")]
	let router = base_router
		.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

	#[cfg(not(feature = "openapi"))]
	let router = base_router;

	let router = router
		.layer(cors)
		.layer(CompressionLayer::new())
		.layer(trace)
		.layer(req_id)
		.layer(body_limit);

	add_security_headers(router)
}
