//! Leads: contact requests submitted with a quote

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "openapi")]
use utoipa::ToSchema;
use uuid::Uuid;

use crate::quotes::{Interest, SolarQuote};

/// Confirmation text shown once a lead is recorded
pub const LEAD_THANK_YOU_MESSAGE: &str =
	"Thank you! We'll contact you soon with your personalized solar quote.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeadValidationError {
	#[error("Missing required field: {field}")]
	MissingRequiredField { field: String },

	#[error("Invalid email address: {email}")]
	InvalidEmail { email: String },
}

pub type LeadValidationResult<T> = Result<T, LeadValidationError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ContactInfo {
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub phone: Option<String>,
}

impl ContactInfo {
	pub fn validate(&self) -> LeadValidationResult<()> {
		if self.name.trim().is_empty() {
			return Err(LeadValidationError::MissingRequiredField {
				field: "name".to_string(),
			});
		}
		let email = self.email.trim();
		if email.is_empty() {
			return Err(LeadValidationError::MissingRequiredField {
				field: "email".to_string(),
			});
		}
		let valid = match email.split_once('@') {
			Some((local, domain)) => {
				!local.is_empty()
					&& domain.contains('.')
					&& !domain.starts_with('.')
					&& !domain.ends_with('.')
			},
			None => false,
		};
		if !valid {
			return Err(LeadValidationError::InvalidEmail {
				email: email.to_string(),
			});
		}
		Ok(())
	}
}

/// Body of a stateless lead submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
	pub contact: ContactInfo,
	#[serde(default)]
	pub interest: Interest,
	#[serde(default)]
	pub address: Option<String>,
	pub quote: SolarQuote,
}

/// A recorded lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Lead {
	pub lead_id: String,
	pub contact: ContactInfo,
	pub interest: Interest,
	pub address: Option<String>,
	pub quote: SolarQuote,
	#[serde(default)]
	pub session_id: Option<String>,
	pub submitted_at: DateTime<Utc>,
}

impl Lead {
	pub fn new(request: LeadRequest, session_id: Option<String>) -> Self {
		Self {
			lead_id: Uuid::new_v4().to_string(),
			contact: request.contact,
			interest: request.interest,
			address: request.address,
			quote: request.quote,
			session_id,
			submitted_at: Utc::now(),
		}
	}
}

/// Response to a recorded lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LeadAcknowledgement {
	pub lead_id: String,
	pub message: String,
	pub submitted_at: DateTime<Utc>,
}

impl From<&Lead> for LeadAcknowledgement {
	fn from(lead: &Lead) -> Self {
		Self {
			lead_id: lead.lead_id.clone(),
			message: LEAD_THANK_YOU_MESSAGE.to_string(),
			submitted_at: lead.submitted_at,
		}
	}
}
