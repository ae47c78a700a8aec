//! Quote service
//!
//! Runs the calculator and signs or verifies the resulting quotes.

use std::sync::Arc;

use solar_types::{IntegrityPayload, PricingConfig, QuoteData, QuoteError, SolarQuote};
use thiserror::Error;
use tracing::{debug, warn};

use crate::integrity::{IntegrityError, IntegrityTrait};
use crate::pricing::calculate_system;

#[derive(Debug, Error)]
pub enum QuoteServiceError {
	#[error(transparent)]
	Quote(#[from] QuoteError),
	#[error("integrity error: {0}")]
	Integrity(#[from] IntegrityError),
}

#[derive(Clone)]
pub struct QuoteService {
	pricing: PricingConfig,
	integrity: Arc<dyn IntegrityTrait>,
}

impl QuoteService {
	pub fn new(pricing: PricingConfig, integrity: Arc<dyn IntegrityTrait>) -> Self {
		Self { pricing, integrity }
	}

	pub fn pricing(&self) -> &PricingConfig {
		&self.pricing
	}

	/// Calculate and sign a quote for `data`
	pub fn create_quote(&self, data: &QuoteData) -> Result<SolarQuote, QuoteServiceError> {
		let system = calculate_system(data, &self.pricing)?;
		let mut quote = SolarQuote::new(system);
		let checksum = self
			.integrity
			.generate_checksum_from_payload(&quote.to_integrity_payload())?;
		quote.integrity_checksum = Some(checksum);
		debug!(
			"Quote {} for {} kW, net ${:.2}",
			quote.quote_id, quote.system.system_size_kw, quote.system.net_price
		);
		Ok(quote)
	}

	/// Check that `quote` is unmodified since it was signed here
	pub fn verify_quote(&self, quote: &SolarQuote) -> Result<(), QuoteServiceError> {
		let Some(checksum) = quote.integrity_checksum.as_deref() else {
			warn!("Quote {} has no integrity checksum", quote.quote_id);
			return Err(QuoteError::IntegrityMismatch.into());
		};
		let valid = match self
			.integrity
			.verify_checksum_from_payload(&quote.to_integrity_payload(), checksum)
		{
			Ok(valid) => valid,
			Err(IntegrityError::InvalidFormat) => false,
			Err(e) => return Err(e.into()),
		};
		if !valid {
			warn!("Quote {} failed integrity verification", quote.quote_id);
			return Err(QuoteError::IntegrityMismatch.into());
		}
		Ok(())
	}
}
