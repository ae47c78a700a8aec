//! Values that are either read from the environment or given inline

use serde::{Deserialize, Serialize};
use solar_types::SecretString;
use std::fmt;

/// Marker prefix used by sample configs for values that must be replaced
pub const INSECURE_DEFAULT_PREFIX: &str = "CHANGE-ME";

/// A settings value that names an environment variable or carries the value itself.
///
/// ```json
/// { "type": "env", "value": "GOOGLE_MAPS_API_KEY" }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ConfigurableValue {
	#[serde(rename = "type")]
	pub value_type: ValueType,
	/// Environment variable name or the literal value
	pub value: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
	Env,
	Plain,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurableValueError {
	#[error("Environment variable '{0}' not found")]
	EnvironmentVariableNotFound(String),
	#[error("Configured value for '{0}' is empty")]
	Empty(String),
}

impl ConfigurableValue {
	pub fn from_env(env_var_name: &str) -> Self {
		Self {
			value_type: ValueType::Env,
			value: env_var_name.to_string(),
		}
	}

	pub fn from_plain(plain_value: &str) -> Self {
		Self {
			value_type: ValueType::Plain,
			value: plain_value.to_string(),
		}
	}

	/// Resolve to the concrete value. Empty results are rejected.
	pub fn resolve(&self) -> Result<String, ConfigurableValueError> {
		let resolved = match self.value_type {
			ValueType::Env => std::env::var(&self.value).map_err(|_| {
				ConfigurableValueError::EnvironmentVariableNotFound(self.value.clone())
			})?,
			ValueType::Plain => self.value.clone(),
		};
		if resolved.trim().is_empty() {
			return Err(ConfigurableValueError::Empty(self.label()));
		}
		Ok(resolved)
	}

	pub fn resolve_for_secret(&self) -> Result<SecretString, ConfigurableValueError> {
		self.resolve().map(SecretString::new)
	}

	/// True for inline values still carrying the sample-config marker
	pub fn is_insecure_default(&self) -> bool {
		self.value_type == ValueType::Plain && self.value.starts_with(INSECURE_DEFAULT_PREFIX)
	}

	/// Log-safe description
	pub fn description(&self) -> String {
		match self.value_type {
			ValueType::Env => format!("environment variable '{}'", self.value),
			ValueType::Plain if self.is_insecure_default() => "insecure default value".to_string(),
			ValueType::Plain => "configured plain value".to_string(),
		}
	}

	fn label(&self) -> String {
		match self.value_type {
			ValueType::Env => self.value.clone(),
			ValueType::Plain => "plain".to_string(),
		}
	}
}

impl fmt::Display for ConfigurableValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value_type {
			ValueType::Env => write!(f, "env:{}", self.value),
			ValueType::Plain if self.is_insecure_default() => write!(f, "plain:[INSECURE-DEFAULT]"),
			ValueType::Plain => write!(f, "plain:[REDACTED]"),
		}
	}
}

/// `"env:NAME"` becomes an env reference, anything else a plain value
impl From<&str> for ConfigurableValue {
	fn from(value: &str) -> Self {
		match value.strip_prefix("env:") {
			Some(env_var) => Self::from_env(env_var),
			None => Self::from_plain(value),
		}
	}
}
