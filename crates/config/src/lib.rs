//! Solar Quote Configuration
//!
//! Settings loading and startup logging for the solar quote service.

pub mod configurable_value;
pub mod loader;
pub mod settings;
pub mod startup_logger;

pub use configurable_value::{ConfigurableValue, ConfigurableValueError, ValueType};
pub use loader::{load_config, load_config_from, ConfigLoadError};
pub use settings::{
	ConfigValidationError, EnvironmentProfile, LogFormat, ProviderEndpoint, Settings,
	GOOGLE_GEOCODING_PROVIDER_ID, GOOGLE_SOLAR_PROVIDER_ID, MOCK_SOLAR_PROVIDER_ID,
};
pub use startup_logger::{log_service_info, log_service_shutdown, log_startup_complete};
