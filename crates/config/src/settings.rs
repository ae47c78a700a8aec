//! Configuration settings structures

use crate::{configurable_value::ConfigurableValue, ConfigurableValueError};
use serde::{Deserialize, Serialize};
use solar_types::constants::limits::{
	DEFAULT_MOCK_DELAY_MS, DEFAULT_PROVIDER_TIMEOUT_MS, DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE,
	DEFAULT_SESSION_TTL_MINUTES, MAX_PROVIDER_TIMEOUT_MS, MAX_SESSION_TTL_MINUTES,
	MIN_PROVIDER_TIMEOUT_MS,
};
pub use solar_types::constants::providers::{
	GOOGLE_GEOCODING_PROVIDER_ID, GOOGLE_SOLAR_PROVIDER_ID, MOCK_SOLAR_PROVIDER_ID,
};
use solar_types::{LayoutConfig, PricingConfig, SecretString};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigValidationError {
	#[error("Invalid server settings: {0}")]
	Server(String),
	#[error("Invalid provider settings: {0}")]
	Provider(String),
	#[error("{0}")]
	Pricing(String),
	#[error("{0}")]
	Layout(String),
	#[error("Invalid session settings: {0}")]
	Sessions(String),
	#[error("Invalid environment settings: {0}")]
	Environment(String),
}

/// Main application settings
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Settings {
	pub server: ServerSettings,
	pub providers: ProviderSettings,
	pub pricing: PricingConfig,
	pub layout: LayoutConfig,
	pub sessions: SessionSettings,
	pub environment: EnvironmentSettings,
	pub logging: LoggingSettings,
	pub security: SecuritySettings,
}

/// Server configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
	pub host: String,
	pub port: u16,
}

impl Default for ServerSettings {
	fn default() -> Self {
		Self {
			host: "0.0.0.0".to_string(),
			port: 3000,
		}
	}
}

/// One outbound provider
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderEndpoint {
	pub provider_id: String,
	pub endpoint: String,
	/// `None` for providers that need no key
	#[serde(default)]
	pub api_key: Option<ConfigurableValue>,
	#[serde(default = "default_provider_timeout")]
	pub timeout_ms: u64,
}

fn default_provider_timeout() -> u64 {
	DEFAULT_PROVIDER_TIMEOUT_MS
}

impl ProviderEndpoint {
	/// Resolve the API key, if one is configured
	pub fn resolve_api_key(&self) -> Result<Option<SecretString>, ConfigurableValueError> {
		self.api_key
			.as_ref()
			.map(|value| value.resolve_for_secret())
			.transpose()
	}
}

/// Geocoding and solar data providers
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
	pub geocoding: ProviderEndpoint,
	pub solar: ProviderEndpoint,
	/// Serve mocked building data when the solar provider fails
	pub fallback_to_mock: bool,
	/// Simulated latency of the mock provider
	pub mock_delay_ms: u64,
	/// Radius requested for imagery layers
	pub data_layers_radius_m: f64,
}

impl Default for ProviderSettings {
	fn default() -> Self {
		Self {
			geocoding: ProviderEndpoint {
				provider_id: GOOGLE_GEOCODING_PROVIDER_ID.to_string(),
				endpoint: "https://maps.googleapis.com/maps/api/geocode/json".to_string(),
				api_key: Some(ConfigurableValue::from_env("GOOGLE_MAPS_API_KEY")),
				timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			},
			solar: ProviderEndpoint {
				provider_id: GOOGLE_SOLAR_PROVIDER_ID.to_string(),
				endpoint: "https://solar.googleapis.com/v1".to_string(),
				api_key: Some(ConfigurableValue::from_env("GOOGLE_MAPS_API_KEY")),
				timeout_ms: DEFAULT_PROVIDER_TIMEOUT_MS,
			},
			fallback_to_mock: true,
			mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
			data_layers_radius_m: 50.0,
		}
	}
}

/// Wizard session lifetime
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SessionSettings {
	pub ttl_minutes: i64,
	pub cleanup_interval_secs: u64,
}

impl Default for SessionSettings {
	fn default() -> Self {
		Self {
			ttl_minutes: DEFAULT_SESSION_TTL_MINUTES,
			cleanup_interval_secs: 60,
		}
	}
}

/// Environment-specific settings
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct EnvironmentSettings {
	pub profile: EnvironmentProfile,
	pub debug: bool,
	pub rate_limiting: RateLimitSettings,
}

impl Default for EnvironmentSettings {
	fn default() -> Self {
		Self {
			profile: EnvironmentProfile::Development,
			debug: true,
			rate_limiting: RateLimitSettings::default(),
		}
	}
}

/// Environment profiles
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentProfile {
	Development,
	Staging,
	Production,
}

/// Rate limiting configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RateLimitSettings {
	pub enabled: bool,
	pub requests_per_minute: u32,
}

impl Default for RateLimitSettings {
	fn default() -> Self {
		Self {
			enabled: false,
			requests_per_minute: DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE,
		}
	}
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingSettings {
	pub level: String,
	pub format: LogFormat,
	pub structured: bool,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			level: "info".to_string(),
			format: LogFormat::Pretty,
			structured: false,
		}
	}
}

/// Log format options
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	Json,
	Pretty,
	Compact,
}

/// Security configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SecuritySettings {
	/// Secret key for signing quotes (HMAC-SHA256).
	///
	/// `{"type": "env", "value": "INTEGRITY_SECRET"}` or
	/// `{"type": "plain", "value": "..."}`.
	pub integrity_secret: ConfigurableValue,
}

impl Default for SecuritySettings {
	fn default() -> Self {
		Self {
			integrity_secret: ConfigurableValue::from_env("INTEGRITY_SECRET"),
		}
	}
}

impl Settings {
	/// Get server bind address
	pub fn bind_address(&self) -> String {
		format!("{}:{}", self.server.host, self.server.port)
	}

	pub fn is_production(&self) -> bool {
		self.environment.profile == EnvironmentProfile::Production
	}

	pub fn is_debug(&self) -> bool {
		self.environment.debug && !self.is_production()
	}

	/// Integrity secret wrapped for secure handling
	pub fn get_integrity_secret_secure(&self) -> Result<SecretString, ConfigurableValueError> {
		self.security.integrity_secret.resolve_for_secret()
	}

	/// Sanity checks run after loading
	pub fn validate(&self) -> Result<(), ConfigValidationError> {
		if self.server.host.trim().is_empty() {
			return Err(ConfigValidationError::Server("host is empty".to_string()));
		}
		for (name, endpoint) in [
			("geocoding", &self.providers.geocoding),
			("solar", &self.providers.solar),
		] {
			if endpoint.provider_id.trim().is_empty() {
				return Err(ConfigValidationError::Provider(format!(
					"{}.provider_id is empty",
					name
				)));
			}
			if !(MIN_PROVIDER_TIMEOUT_MS..=MAX_PROVIDER_TIMEOUT_MS).contains(&endpoint.timeout_ms)
			{
				return Err(ConfigValidationError::Provider(format!(
					"{}.timeout_ms {} outside {}-{}ms",
					name, endpoint.timeout_ms, MIN_PROVIDER_TIMEOUT_MS, MAX_PROVIDER_TIMEOUT_MS
				)));
			}
		}
		if !self.providers.data_layers_radius_m.is_finite()
			|| self.providers.data_layers_radius_m <= 0.0
		{
			return Err(ConfigValidationError::Provider(
				"data_layers_radius_m must be positive".to_string(),
			));
		}
		self.pricing
			.validate()
			.map_err(ConfigValidationError::Pricing)?;
		self.layout.validate().map_err(ConfigValidationError::Layout)?;
		if !(1..=MAX_SESSION_TTL_MINUTES).contains(&self.sessions.ttl_minutes) {
			return Err(ConfigValidationError::Sessions(format!(
				"ttl_minutes {} outside 1-{}",
				self.sessions.ttl_minutes, MAX_SESSION_TTL_MINUTES
			)));
		}
		if self.sessions.cleanup_interval_secs == 0 {
			return Err(ConfigValidationError::Sessions(
				"cleanup_interval_secs must be positive".to_string(),
			));
		}
		let rate_limiting = &self.environment.rate_limiting;
		if rate_limiting.enabled && rate_limiting.requests_per_minute == 0 {
			return Err(ConfigValidationError::Environment(
				"rate_limiting.requests_per_minute must be positive when enabled".to_string(),
			));
		}
		Ok(())
	}
}
