//! Wizard service
//!
//! Drives a session through address → energy → system → quote. Forward
//! moves go one step at a time; going back keeps everything entered.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use solar_storage::Storage;
use solar_types::{
	BuildingData, BuildingDataSource, ContactInfo, DataLayers, GeocodingProvider, Interest,
	LatLng, LayoutConfig, LeadAcknowledgement, LeadRequest, MapView, PanelType, ProviderError,
	QuoteData, QuoteSession, QuoteValidationError, RoofType, SolarDataProvider, StorageError,
	WarrantyTier, WizardStep,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::layout::{self, LayoutError};
use crate::leads::{LeadError, LeadService};
use crate::map::build_map_view;
use crate::quotes::{QuoteService, QuoteServiceError};

#[derive(Debug, Error)]
pub enum WizardError {
	#[error("session not found: {0}")]
	SessionNotFound(String),
	#[error("cannot move from step {} to step {}", .from.number(), .to.number())]
	InvalidTransition { from: WizardStep, to: WizardStep },
	#[error("validation error: {0}")]
	Validation(#[from] QuoteValidationError),
	#[error("geocoding failed: {0}")]
	Geocoding(ProviderError),
	#[error("the address has not been located yet")]
	MissingLocation,
	#[error(transparent)]
	Layout(#[from] LayoutError),
	#[error(transparent)]
	Quote(#[from] QuoteServiceError),
	#[error(transparent)]
	Lead(#[from] LeadError),
	#[error("session {0} was changed by another request")]
	Conflict(String),
	#[error("storage error: {0}")]
	Storage(String),
}

/// Step two input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyInput {
	#[serde(default)]
	pub monthly_bill: Option<f64>,
	#[serde(default)]
	pub monthly_usage_kwh: Option<f64>,
	#[serde(default)]
	pub roof_type: RoofType,
	#[serde(default)]
	pub interest: Option<Interest>,
}

/// Step three input
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInput {
	#[serde(default)]
	pub system_size_kw: Option<f64>,
	#[serde(default)]
	pub panel_type: PanelType,
	#[serde(default)]
	pub warranty: WarrantyTier,
	#[serde(default)]
	pub battery: bool,
}

/// Wizard behaviour knobs taken from settings
#[derive(Debug, Clone)]
pub struct WizardOptions {
	pub session_ttl_minutes: i64,
	pub layout: LayoutConfig,
	pub data_layers_radius_m: f64,
}

impl Default for WizardOptions {
	fn default() -> Self {
		Self {
			session_ttl_minutes: solar_types::constants::limits::DEFAULT_SESSION_TTL_MINUTES,
			layout: LayoutConfig::default(),
			data_layers_radius_m: 50.0,
		}
	}
}

#[derive(Clone)]
pub struct WizardService {
	storage: Arc<dyn Storage>,
	geocoder: Arc<dyn GeocodingProvider>,
	solar: Arc<dyn SolarDataProvider>,
	/// Used when `solar` fails
	fallback: Option<Arc<dyn SolarDataProvider>>,
	quotes: QuoteService,
	leads: LeadService,
	options: WizardOptions,
}

impl WizardService {
	pub fn new(
		storage: Arc<dyn Storage>,
		geocoder: Arc<dyn GeocodingProvider>,
		solar: Arc<dyn SolarDataProvider>,
		fallback: Option<Arc<dyn SolarDataProvider>>,
		quotes: QuoteService,
		leads: LeadService,
		options: WizardOptions,
	) -> Self {
		Self {
			storage,
			geocoder,
			solar,
			fallback,
			quotes,
			leads,
			options,
		}
	}

	pub async fn start_session(&self) -> Result<QuoteSession, WizardError> {
		let session = QuoteSession::new(self.options.session_ttl_minutes);
		self.storage
			.create_session(session.clone())
			.await
			.map_err(|e| WizardError::Storage(e.to_string()))?;
		info!("Started wizard session {}", session.session_id);
		Ok(session)
	}

	pub async fn get_session(&self, session_id: &str) -> Result<QuoteSession, WizardError> {
		self.storage
			.get_session(session_id)
			.await
			.map_err(|e| WizardError::Storage(e.to_string()))?
			.ok_or_else(|| WizardError::SessionNotFound(session_id.to_string()))
	}

	/// Write back a session read earlier in this request. Fails with
	/// `Conflict` when another request stored a newer version meanwhile.
	async fn save(&self, mut session: QuoteSession) -> Result<QuoteSession, WizardError> {
		session.touch(self.options.session_ttl_minutes);
		self.storage
			.update_session(session.clone())
			.await
			.map_err(|e| match e {
				StorageError::Conflict { id, .. } => {
					warn!("Concurrent update of session {} rejected", id);
					WizardError::Conflict(id)
				},
				StorageError::NotFound { id } => WizardError::SessionNotFound(id),
				other => WizardError::Storage(other.to_string()),
			})?;
		session.version += 1;
		Ok(session)
	}

	fn require_step(session: &QuoteSession, at_least: WizardStep, to: WizardStep) -> Result<(), WizardError> {
		if session.step < at_least {
			return Err(WizardError::InvalidTransition {
				from: session.step,
				to,
			});
		}
		Ok(())
	}

	/// Building data from the live provider, else the fallback
	async fn fetch_building(&self, location: &LatLng) -> (Option<BuildingData>, BuildingDataSource) {
		match self.solar.building_insights(location).await {
			Ok(building) => return (Some(building), BuildingDataSource::Live),
			Err(e) => warn!("Building insights from {} failed: {}", self.solar.id(), e),
		}

		if let Some(fallback) = &self.fallback {
			match fallback.building_insights(location).await {
				Ok(building) => {
					info!("Using {} building data", fallback.id());
					return (Some(building), BuildingDataSource::Mock);
				},
				Err(e) => warn!("Fallback building data failed: {}", e),
			}
		}
		(None, BuildingDataSource::Unavailable)
	}

	/// Recompute the quote, and the layout once the system is configured
	fn refresh(&self, session: &mut QuoteSession) -> Result<(), WizardError> {
		if session.data.validate_energy().is_err() {
			session.quote = None;
			session.layout = None;
			return Ok(());
		}

		let quote = self.quotes.create_quote(&session.data)?;
		session.layout = if session.step == WizardStep::Quote {
			session.data.location.map(|location| {
				let center = session
					.data
					.building
					.as_ref()
					.and_then(|building| building.center)
					.unwrap_or(location);
				let pricing = self.quotes.pricing();
				let candidates = layout::candidates_for(
					session.data.building.as_ref(),
					&center,
					quote.system.panel_count,
					&self.options.layout,
					(pricing.panel_height_m, pricing.panel_width_m),
				);
				layout::place_panels(&candidates, &center, quote.system.panel_count, &self.options.layout)
			})
		} else {
			None
		};
		session.quote = Some(quote);
		Ok(())
	}

	/// Step one: locate the address and fetch its building data
	pub async fn submit_address(&self, session_id: &str, address: &str) -> Result<QuoteSession, WizardError> {
		let mut session = self.get_session(session_id).await?;
		QuoteData::validate_address(address)?;

		let geocoded = self
			.geocoder
			.geocode(address.trim())
			.await
			.map_err(WizardError::Geocoding)?;
		let (building, source) = self.fetch_building(&geocoded.location).await;

		session.data.address = geocoded.formatted_address;
		session.data.location = Some(geocoded.location);
		session.data.building = building;
		session.building_source = Some(source);
		session.step = WizardStep::Energy;
		self.refresh(&mut session)?;

		debug!("Session {} located ({:?} building data)", session_id, source);
		self.save(session).await
	}

	/// Step two: usage, roof and interest
	pub async fn submit_energy(&self, session_id: &str, input: EnergyInput) -> Result<QuoteSession, WizardError> {
		let mut session = self.get_session(session_id).await?;
		Self::require_step(&session, WizardStep::Energy, WizardStep::System)?;

		let mut data = session.data.clone();
		data.monthly_bill = input.monthly_bill;
		data.monthly_usage_kwh = input.monthly_usage_kwh;
		data.roof_type = input.roof_type;
		if let Some(interest) = input.interest {
			data.interest = interest;
		}
		data.validate_energy()?;

		session.data = data;
		session.step = WizardStep::System;
		self.refresh(&mut session)?;
		self.save(session).await
	}

	/// Step three: size, panels, warranty, battery
	pub async fn configure_system(&self, session_id: &str, input: SystemInput) -> Result<QuoteSession, WizardError> {
		let mut session = self.get_session(session_id).await?;
		Self::require_step(&session, WizardStep::System, WizardStep::Quote)?;

		let mut data = session.data.clone();
		data.system_size_kw = input.system_size_kw;
		data.panel_type = input.panel_type;
		data.warranty = input.warranty;
		data.battery = input.battery;
		data.validate()?;

		session.data = data;
		session.step = WizardStep::Quote;
		self.refresh(&mut session)?;
		self.save(session).await
	}

	pub async fn go_back(&self, session_id: &str, step: WizardStep) -> Result<QuoteSession, WizardError> {
		let mut session = self.get_session(session_id).await?;
		if step >= session.step {
			return Err(WizardError::InvalidTransition {
				from: session.step,
				to: step,
			});
		}
		session.step = step;
		self.save(session).await
	}

	/// Drag a panel marker on the quote step
	pub async fn move_panel(
		&self,
		session_id: &str,
		index: u32,
		position: LatLng,
	) -> Result<QuoteSession, WizardError> {
		let mut session = self.get_session(session_id).await?;
		if session.step != WizardStep::Quote {
			return Err(WizardError::InvalidTransition {
				from: session.step,
				to: WizardStep::Quote,
			});
		}
		let layout = session
			.layout
			.as_mut()
			.ok_or(WizardError::MissingLocation)?;
		layout::move_panel(layout, index, position)?;
		self.save(session).await
	}

	/// Map view with imagery overlays when the provider has them
	pub async fn map_view(&self, session_id: &str) -> Result<MapView, WizardError> {
		let session = self.get_session(session_id).await?;
		let location = session.data.location.ok_or(WizardError::MissingLocation)?;

		let layers: Option<DataLayers> = match self
			.solar
			.data_layers(&location, self.options.data_layers_radius_m)
			.await
		{
			Ok(layers) => Some(layers),
			Err(ProviderError::UnsupportedOperation { .. }) => None,
			Err(e) => {
				warn!("Data layers unavailable for session {}: {}", session_id, e);
				None
			},
		};

		build_map_view(&session, layers.as_ref()).ok_or(WizardError::MissingLocation)
	}

	/// Turn the session's quote into a lead
	pub async fn submit_contact(
		&self,
		session_id: &str,
		contact: ContactInfo,
	) -> Result<LeadAcknowledgement, WizardError> {
		let mut session = self.get_session(session_id).await?;
		let quote = match (&session.quote, session.step) {
			(Some(quote), WizardStep::Quote) => quote.clone(),
			_ => {
				return Err(WizardError::InvalidTransition {
					from: session.step,
					to: WizardStep::Quote,
				})
			},
		};

		let request = LeadRequest {
			contact,
			interest: session.data.interest,
			address: Some(session.data.address.clone()),
			quote,
		};
		let ack = self
			.leads
			.acknowledge(request, Some(session.session_id.clone()))
			.await?;
		session.lead_id = Some(ack.lead_id.clone());
		self.save(session).await?;
		Ok(ack)
	}
}
