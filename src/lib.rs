//! Solar Quote Library
//!
//! Server side of a residential solar quote wizard: address lookup, roof
//! data, pricing, panel placement, map views and lead capture behind an
//! HTTP API.

// Core domain types
pub use solar_types::{
	chrono,
	serde_json,
	BuildingData,
	ContactInfo,
	GeocodedAddress,
	GeocodingProvider,
	LatLng,
	Lead,
	LeadRequest,
	MapView,
	PanelLayout,
	PricingConfig,
	ProviderError,
	QuoteData,
	QuoteError,
	QuoteSession,
	SolarDataProvider,
	SolarQuote,
	SolarSystem,
	WizardStep,
};

// Service layer
pub use solar_service::{
	IntegrityService, IntegrityTrait, LeadService, QuoteService, WizardError, WizardOptions,
	WizardService,
};

// Storage layer
pub use solar_storage::{
	traits::{LeadStorage, SessionStorage, StorageError, StorageResult},
	MemoryStore, Storage,
};

// API layer
pub use solar_api::{create_router, AppState};

// Providers
pub use solar_adapters::{
	mock_building_data, ClientCache, GoogleGeocodingAdapter, GoogleSolarAdapter,
	MockSolarProvider, ProviderFactory,
};

// Config
pub use solar_config::{load_config, log_service_info, log_startup_complete, Settings};

pub mod models {
	pub use solar_types::*;
}

pub mod service {
	pub use solar_service::*;
}

pub mod mocks;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use solar_config::{log_service_shutdown, LogFormat, MOCK_SOLAR_PROVIDER_ID};
use tracing::{info, warn};

// Re-export external dependencies for tests and embedders
pub use async_trait;
pub use reqwest;

/// Builder for the quote server
pub struct QuoteServerBuilder<S = MemoryStore>
where
	S: Storage + 'static,
{
	settings: Option<Settings>,
	storage: S,
	geocoder: Option<Arc<dyn GeocodingProvider>>,
	solar_provider: Option<Arc<dyn SolarDataProvider>>,
}

impl<S> QuoteServerBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Create a new builder with the provided storage
	pub fn with_storage(storage: S) -> Self {
		Self {
			settings: None,
			storage,
			geocoder: None,
			solar_provider: None,
		}
	}
}

impl Default for QuoteServerBuilder<MemoryStore> {
	fn default() -> Self {
		Self::new()
	}
}

impl QuoteServerBuilder<MemoryStore> {
	/// Create a new builder with default memory storage
	pub fn new() -> Self {
		Self::with_storage(MemoryStore::new())
	}

	/// Builder whose memory store sweeps sessions on the configured interval
	pub fn from_config(settings: Settings) -> Self {
		let store = MemoryStore::with_cleanup_interval(Duration::from_secs(
			settings.sessions.cleanup_interval_secs,
		));
		Self::with_storage(store).with_settings(settings)
	}
}

impl<S> QuoteServerBuilder<S>
where
	S: Storage + Clone + 'static,
{
	/// Set custom settings
	pub fn with_settings(mut self, settings: Settings) -> Self {
		self.settings = Some(settings);
		self
	}

	/// Get the current settings
	pub fn settings(&self) -> Option<&Settings> {
		self.settings.as_ref()
	}

	/// Use `geocoder` instead of the configured one
	pub fn with_geocoder(mut self, geocoder: Arc<dyn GeocodingProvider>) -> Self {
		self.geocoder = Some(geocoder);
		self
	}

	/// Use `provider` instead of the configured solar provider
	pub fn with_solar_provider(mut self, provider: Arc<dyn SolarDataProvider>) -> Self {
		self.solar_provider = Some(provider);
		self
	}

	/// Initialize tracing with configuration-based settings
	fn init_tracing_from_settings(
		&self,
		settings: &Settings,
	) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
		let log_level = &settings.logging.level;
		let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

		match settings.logging.format {
			LogFormat::Json => {
				let subscriber = tracing_subscriber::fmt().json().with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Pretty => {
				let subscriber = tracing_subscriber::fmt()
					.pretty()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
			LogFormat::Compact => {
				let subscriber = tracing_subscriber::fmt()
					.compact()
					.with_env_filter(env_filter);
				if settings.logging.structured {
					subscriber.with_target(true).with_thread_ids(true).try_init()?;
				} else {
					subscriber.try_init()?;
				}
			},
		}

		info!(
			"Logging configuration applied: level={}, format={:?}, structured={}",
			settings.logging.level, settings.logging.format, settings.logging.structured
		);
		Ok(())
	}

	fn build_geocoder(
		factory: &ProviderFactory,
		settings: &Settings,
	) -> Result<Arc<dyn GeocodingProvider>, String> {
		let endpoint = &settings.providers.geocoding;
		let api_key = endpoint
			.resolve_api_key()
			.map_err(|e| format!("Geocoding API key unavailable: {}", e))?;
		factory
			.create_geocoder(
				&endpoint.provider_id,
				&endpoint.endpoint,
				api_key,
				endpoint.timeout_ms,
			)
			.map_err(|e| {
				format!(
					"Failed to create geocoding provider '{}': {}",
					endpoint.provider_id, e
				)
			})
	}

	fn build_solar_provider(
		factory: &ProviderFactory,
		settings: &Settings,
		mock: &Arc<dyn SolarDataProvider>,
	) -> Result<Arc<dyn SolarDataProvider>, String> {
		let endpoint = &settings.providers.solar;
		let created = endpoint
			.resolve_api_key()
			.map_err(|e| e.to_string())
			.and_then(|api_key| {
				factory
					.create_solar_provider(
						&endpoint.provider_id,
						&endpoint.endpoint,
						api_key,
						endpoint.timeout_ms,
						Duration::from_millis(settings.providers.mock_delay_ms),
					)
					.map_err(|e| e.to_string())
			});

		match created {
			Ok(provider) => Ok(provider),
			Err(e) if settings.providers.fallback_to_mock => {
				warn!(
					"Solar provider '{}' unavailable ({}); serving mock building data",
					endpoint.provider_id, e
				);
				Ok(Arc::clone(mock))
			},
			Err(e) => Err(format!(
				"Failed to create solar provider '{}': {}",
				endpoint.provider_id, e
			)),
		}
	}

	/// Wire services and return the configured router with state
	pub async fn start(self) -> Result<(axum::Router, AppState), Box<dyn std::error::Error>> {
		let settings = self.settings.clone().unwrap_or_default();
		settings
			.validate()
			.map_err(|e| format!("Invalid configuration: {}", e))?;

		let factory = ProviderFactory::new();
		let mock_solar: Arc<dyn SolarDataProvider> = Arc::new(MockSolarProvider::new(
			Duration::from_millis(settings.providers.mock_delay_ms),
		));

		let geocoder = match self.geocoder {
			Some(geocoder) => geocoder,
			None => Self::build_geocoder(&factory, &settings)?,
		};
		let solar_provider = match self.solar_provider {
			Some(provider) => provider,
			None => Self::build_solar_provider(&factory, &settings, &mock_solar)?,
		};
		let fallback = (settings.providers.fallback_to_mock
			&& solar_provider.id() != MOCK_SOLAR_PROVIDER_ID)
			.then(|| Arc::clone(&mock_solar));
		info!(
			"Providers: geocoding={}, solar={}, fallback={}",
			geocoder.id(),
			solar_provider.id(),
			fallback.as_ref().map(|p| p.id()).unwrap_or("none")
		);

		let integrity_secret = settings.get_integrity_secret_secure().map_err(|e| {
			format!(
				"Failed to resolve integrity secret: {}. Please set the INTEGRITY_SECRET environment variable with a secure random string (minimum 32 characters).",
				e
			)
		})?;
		let integrity_service =
			Arc::new(IntegrityService::new(integrity_secret)) as Arc<dyn IntegrityTrait>;

		let storage: Arc<dyn Storage> = Arc::new(self.storage.clone());
		let quote_service = QuoteService::new(settings.pricing.clone(), integrity_service);
		let lead_service = LeadService::new(Arc::clone(&storage), quote_service.clone());
		let wizard_service = WizardService::new(
			Arc::clone(&storage),
			Arc::clone(&geocoder),
			Arc::clone(&solar_provider),
			fallback,
			quote_service.clone(),
			lead_service.clone(),
			WizardOptions {
				session_ttl_minutes: settings.sessions.ttl_minutes,
				layout: settings.layout.clone(),
				data_layers_radius_m: settings.providers.data_layers_radius_m,
			},
		);

		let app_state = AppState {
			wizard_service: Arc::new(wizard_service),
			quote_service: Arc::new(quote_service),
			lead_service: Arc::new(lead_service),
			geocoder,
			solar_provider,
			mock_solar_provider: mock_solar,
			storage,
		};

		let router = create_router().with_state(app_state.clone());
		Ok((router, app_state))
	}

	/// Start the complete server: .env, configuration, tracing, session
	/// cleanup, then bind and serve until Ctrl-C.
	pub async fn start_server(mut self) -> Result<(), Box<dyn std::error::Error>> {
		dotenvy::dotenv().ok();

		let settings = match self.settings.take() {
			Some(settings) => settings,
			None => load_config()?,
		};

		self.init_tracing_from_settings(&settings)
			.map_err(|e| e as Box<dyn std::error::Error>)?;
		log_service_info(&settings);

		let bind_addr = settings.bind_address();
		let addr: SocketAddr = bind_addr
			.parse()
			.map_err(|e| format!("Invalid bind address '{}': {}", bind_addr, e))?;

		self.settings = Some(settings.clone());
		let (app, state) = self.start().await?;

		state
			.storage
			.start_background_tasks()
			.await
			.map_err(|e| format!("Failed to start storage background tasks: {}", e))?;
		info!(
			"Session store ready (ttl {} min, sweep every {}s)",
			settings.sessions.ttl_minutes, settings.sessions.cleanup_interval_secs
		);

		let listener = tokio::net::TcpListener::bind(addr).await?;

		log_startup_complete(&bind_addr);
		info!("API endpoints available:");
		info!("  GET  /health");
		info!("  GET  /ready");
		info!("  POST /api/solar-data");
		info!("  POST /api/v1/geocode");
		info!("  POST /api/v1/quotes");
		info!("  POST /api/v1/leads");
		info!("  POST /api/v1/sessions");
		info!("  GET  /api/v1/sessions/{{id}}");
		info!("  POST /api/v1/sessions/{{id}}/{{address|energy|system|back|contact}}");
		info!("  GET  /api/v1/sessions/{{id}}/map");
		info!("  PUT  /api/v1/sessions/{{id}}/panels/{{index}}");
		if cfg!(feature = "openapi") {
			info!("  GET  /swagger-ui");
			info!("  GET  /api-docs/openapi.json");
		}

		let rate_cfg = &settings.environment.rate_limiting;
		if rate_cfg.enabled {
			use tower::limit::RateLimitLayer;
			use tower::ServiceBuilder;
			let make_svc = ServiceBuilder::new()
				.layer(RateLimitLayer::new(
					rate_cfg.requests_per_minute as u64,
					Duration::from_secs(60),
				))
				.service(app.into_make_service());
			axum::serve(listener, make_svc)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		} else {
			axum::serve(listener, app)
				.with_graceful_shutdown(shutdown_signal())
				.await?;
		}

		log_service_shutdown();
		Ok(())
	}
}

async fn shutdown_signal() {
	if let Err(e) = tokio::signal::ctrl_c().await {
		warn!("Failed to listen for shutdown signal: {}", e);
		std::future::pending::<()>().await;
	}
}
