//! Error envelope and error-to-status mapping shared by handlers

use axum::{http::StatusCode, response::Json};
use serde::Serialize;
use solar_service::{LayoutError, LeadError, QuoteServiceError, WizardError};
use solar_types::{ProviderError, QuoteError};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Error response format shared by handlers
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
	pub timestamp: i64,
}

pub type ApiFailure = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> ApiFailure {
	(
		status,
		Json(ErrorResponse {
			error: error.to_string(),
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp(),
		}),
	)
}

pub fn validation_error(message: impl Into<String>) -> ApiFailure {
	error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
}

/// An address that matches nothing is the caller's problem; anything else
/// is the upstream geocoder failing
pub fn geocoding_failure(e: &ProviderError) -> ApiFailure {
	if e.is_not_found() {
		error_response(StatusCode::UNPROCESSABLE_ENTITY, "GEOCODING_FAILED", e.to_string())
	} else {
		error_response(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", e.to_string())
	}
}

pub fn quote_failure(e: QuoteServiceError) -> ApiFailure {
	match e {
		QuoteServiceError::Quote(QuoteError::Validation(v)) => validation_error(v.to_string()),
		QuoteServiceError::Quote(QuoteError::IntegrityMismatch) => error_response(
			StatusCode::BAD_REQUEST,
			"INTEGRITY_ERROR",
			"Quote has been modified or was not issued by this service",
		),
		QuoteServiceError::Quote(e) => {
			error_response(StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR", e.to_string())
		},
		QuoteServiceError::Integrity(e) => {
			error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTEGRITY_ERROR", e.to_string())
		},
	}
}

pub fn lead_failure(e: LeadError) -> ApiFailure {
	match e {
		LeadError::Validation(v) => validation_error(v.to_string()),
		LeadError::Quote(q) => quote_failure(q),
		LeadError::Storage(msg) => {
			error_response(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", msg)
		},
	}
}

pub fn wizard_failure(e: WizardError) -> ApiFailure {
	match e {
		WizardError::SessionNotFound(id) => error_response(
			StatusCode::NOT_FOUND,
			"SESSION_NOT_FOUND",
			format!("Session {} not found or expired", id),
		),
		e @ WizardError::InvalidTransition { .. } | e @ WizardError::MissingLocation => {
			error_response(StatusCode::CONFLICT, "INVALID_TRANSITION", e.to_string())
		},
		WizardError::Validation(v) => validation_error(v.to_string()),
		WizardError::Geocoding(p) => geocoding_failure(&p),
		WizardError::Layout(e @ LayoutError::UnknownPanel { .. }) => {
			error_response(StatusCode::NOT_FOUND, "PANEL_NOT_FOUND", e.to_string())
		},
		WizardError::Layout(e) => {
			error_response(StatusCode::UNPROCESSABLE_ENTITY, "LAYOUT_VIOLATION", e.to_string())
		},
		WizardError::Quote(q) => quote_failure(q),
		WizardError::Lead(l) => lead_failure(l),
		e @ WizardError::Conflict(_) => {
			error_response(StatusCode::CONFLICT, "SESSION_CONFLICT", e.to_string())
		},
		WizardError::Storage(msg) => {
			error_response(StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR", msg)
		},
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use solar_types::{QuoteValidationError, WizardStep};

	#[test]
	fn test_wizard_errors_map_to_statuses() {
		let (status, body) = wizard_failure(WizardError::SessionNotFound("abc".into()));
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body.error, "SESSION_NOT_FOUND");

		let (status, body) = wizard_failure(WizardError::InvalidTransition {
			from: WizardStep::Address,
			to: WizardStep::System,
		});
		assert_eq!(status, StatusCode::CONFLICT);
		assert_eq!(body.error, "INVALID_TRANSITION");

		let (status, _) = wizard_failure(WizardError::Validation(
			QuoteValidationError::MissingRequiredField {
				field: "address".into(),
			},
		));
		assert_eq!(status, StatusCode::BAD_REQUEST);

		let (status, body) = wizard_failure(WizardError::Layout(LayoutError::UnknownPanel {
			index: 9,
		}));
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert_eq!(body.error, "PANEL_NOT_FOUND");

		let (status, body) = wizard_failure(WizardError::Conflict("abc".into()));
		assert_eq!(status, StatusCode::CONFLICT);
		assert_eq!(body.error, "SESSION_CONFLICT");
	}

	#[test]
	fn test_geocoding_not_found_is_unprocessable() {
		let (status, body) = geocoding_failure(&ProviderError::NotFound {
			query: "nowhere".into(),
		});
		assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
		assert_eq!(body.error, "GEOCODING_FAILED");

		let (status, body) = geocoding_failure(&ProviderError::from_http_failure(503));
		assert_eq!(status, StatusCode::BAD_GATEWAY);
		assert_eq!(body.error, "PROVIDER_ERROR");
	}

	#[test]
	fn test_tampered_quote_is_integrity_error() {
		let (status, body) = quote_failure(QuoteError::IntegrityMismatch.into());
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body.error, "INTEGRITY_ERROR");
	}
}
