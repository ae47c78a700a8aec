use std::sync::Arc;

use solar_service::{LeadService, QuoteService, WizardService};
use solar_storage::Storage;
use solar_types::{GeocodingProvider, SolarDataProvider};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
	pub wizard_service: Arc<WizardService>,
	pub quote_service: Arc<QuoteService>,
	pub lead_service: Arc<LeadService>,
	pub geocoder: Arc<dyn GeocodingProvider>,
	pub solar_provider: Arc<dyn SolarDataProvider>,
	/// Serves `/api/solar-data`
	pub mock_solar_provider: Arc<dyn SolarDataProvider>,
	pub storage: Arc<dyn Storage>,
}
