//! Lead service
//!
//! Validates contact details, checks the quote's signature and records the lead.

use std::sync::Arc;

use solar_storage::Storage;
use solar_types::{Lead, LeadAcknowledgement, LeadRequest, LeadValidationError};
use thiserror::Error;
use tracing::info;

use crate::quotes::{QuoteService, QuoteServiceError};

#[derive(Debug, Error)]
pub enum LeadError {
	#[error("validation error: {0}")]
	Validation(#[from] LeadValidationError),
	#[error("quote rejected: {0}")]
	Quote(#[from] QuoteServiceError),
	#[error("storage error: {0}")]
	Storage(String),
}

#[derive(Clone)]
pub struct LeadService {
	storage: Arc<dyn Storage>,
	quotes: QuoteService,
}

impl LeadService {
	pub fn new(storage: Arc<dyn Storage>, quotes: QuoteService) -> Self {
		Self { storage, quotes }
	}

	pub async fn submit_lead(
		&self,
		request: LeadRequest,
		session_id: Option<String>,
	) -> Result<Lead, LeadError> {
		request.contact.validate()?;
		self.quotes.verify_quote(&request.quote)?;

		let lead = Lead::new(request, session_id);
		self.storage
			.add_lead(lead.clone())
			.await
			.map_err(|e| LeadError::Storage(e.to_string()))?;
		info!(
			"Recorded lead {} for quote {} ({:?})",
			lead.lead_id, lead.quote.quote_id, lead.interest
		);
		Ok(lead)
	}

	/// Submit and return the user-facing acknowledgement
	pub async fn acknowledge(
		&self,
		request: LeadRequest,
		session_id: Option<String>,
	) -> Result<LeadAcknowledgement, LeadError> {
		let lead = self.submit_lead(request, session_id).await?;
		Ok(LeadAcknowledgement::from(&lead))
	}

	pub async fn get_lead(&self, lead_id: &str) -> Result<Option<Lead>, LeadError> {
		self.storage
			.get_lead(lead_id)
			.await
			.map_err(|e| LeadError::Storage(e.to_string()))
	}
}
