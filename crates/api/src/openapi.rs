use utoipa::OpenApi;

use crate::handlers::common::ErrorResponse;
use crate::handlers::geocode::AddressRequest;
use crate::handlers::health::ReadinessResponse;
use crate::handlers::sessions::{BackRequest, EnergyRequest, SystemRequest};
use crate::handlers::solar_data::SolarDataError;
use crate::handlers::{geocode, health, leads, quotes, sessions, solar_data};

use solar_types::{
	BuildingData, ContactInfo, GeocodedAddress, LatLng, LeadAcknowledgement, LeadRequest,
	MapView, QuoteData, QuoteSession, SolarQuote, WizardStep,
};

#[derive(OpenApi)]
#[openapi(
	paths(
		health::health,
		health::ready,
		solar_data::post_solar_data,
		geocode::post_geocode,
		quotes::post_quotes,
		leads::post_leads,
		sessions::create_session,
		sessions::get_session,
		sessions::post_address,
		sessions::post_energy,
		sessions::post_system,
		sessions::post_back,
		sessions::get_map,
		sessions::put_panel,
		sessions::post_contact,
	),
	components(schemas(
		ErrorResponse, ReadinessResponse, SolarDataError,
		AddressRequest, EnergyRequest, SystemRequest, BackRequest,
		BuildingData, LatLng, GeocodedAddress, QuoteData, SolarQuote,
		QuoteSession, WizardStep, MapView, ContactInfo, LeadRequest, LeadAcknowledgement
	)),
	tags(
		(name = "sessions", description = "Quote wizard sessions"),
		(name = "quotes", description = "Stateless quote calculation"),
		(name = "leads", description = "Lead capture"),
		(name = "geocoding", description = "Address lookup"),
		(name = "solar", description = "Mock building data"),
		(name = "health", description = "Health and readiness endpoints")
	)
)]
pub struct ApiDoc;
