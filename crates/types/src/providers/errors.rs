//! Error types for provider operations

use thiserror::Error;

/// Failures talking to a geocoding or solar data provider
#[derive(Error, Debug)]
pub enum ProviderError {
	#[error("HTTP request failed: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("HTTP {status_code}: {reason}")]
	HttpStatusError { status_code: u16, reason: String },

	#[error("Timeout occurred after {timeout_ms}ms")]
	Timeout { timeout_ms: u64 },

	#[error("Invalid response format: {reason}")]
	InvalidResponse { reason: String },

	#[error("No results for '{query}'")]
	NotFound { query: String },

	#[error("Provider returned error: {status} - {message}")]
	ApiError { status: String, message: String },

	#[error("Missing API key for provider {provider_id}")]
	MissingApiKey { provider_id: String },

	#[error("Configuration error: {reason}")]
	ConfigError { reason: String },

	#[error("Unsupported operation: {operation} for provider {provider_id}")]
	UnsupportedOperation {
		operation: String,
		provider_id: String,
	},

	#[error("Provider not registered: {provider_id}")]
	NotRegistered { provider_id: String },

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl ProviderError {
	/// HTTP status code carried by the error, if any
	pub fn status_code(&self) -> Option<u16> {
		match self {
			ProviderError::HttpStatusError { status_code, .. } => Some(*status_code),
			ProviderError::HttpError(e) => e.status().map(|s| s.as_u16()),
			_ => None,
		}
	}

	pub fn http_failure(status_code: u16, reason: impl Into<String>) -> Self {
		Self::HttpStatusError {
			status_code,
			reason: reason.into(),
		}
	}

	/// Build an HTTP failure with the standard reason phrase
	pub fn from_http_failure(status_code: u16) -> Self {
		let reason = match status_code {
			400 => "Bad Request".to_string(),
			401 => "Unauthorized".to_string(),
			403 => "Forbidden".to_string(),
			404 => "Not Found".to_string(),
			429 => "Too Many Requests".to_string(),
			500 => "Internal Server Error".to_string(),
			502 => "Bad Gateway".to_string(),
			503 => "Service Unavailable".to_string(),
			504 => "Gateway Timeout".to_string(),
			_ => format!("HTTP Error {}", status_code),
		};
		Self::http_failure(status_code, reason)
	}

	/// Whether the failure means the location simply has no data
	pub fn is_not_found(&self) -> bool {
		matches!(self, ProviderError::NotFound { .. }) || self.status_code() == Some(404)
	}
}
