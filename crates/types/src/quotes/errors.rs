//! Error types for quote inputs and quote processing

use thiserror::Error;

/// Validation errors for wizard and calculator inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuoteValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid value for {field}: {reason}")]
	InvalidValue { field: String, reason: String },

	#[error("System size {value} kW is out of range (0, {max}]")]
	SystemSizeOutOfRange { value: f64, max: f64 },

	#[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
	InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// General quote errors
#[derive(Error, Debug)]
pub enum QuoteError {
	#[error("Quote validation failed: {0}")]
	Validation(#[from] QuoteValidationError),

	#[error("Quote calculation failed: {reason}")]
	CalculationFailed { reason: String },

	#[error("Quote integrity check failed")]
	IntegrityMismatch,

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}
