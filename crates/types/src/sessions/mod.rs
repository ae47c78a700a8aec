//! Wizard session state

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;
use uuid::Uuid;

use crate::map::PanelLayout;
use crate::quotes::{QuoteData, SolarQuote};

/// Wizard steps in order. Forward moves go one step at a time.
#[derive(
	Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
	#[default]
	Address,
	Energy,
	System,
	Quote,
}

impl WizardStep {
	/// 1-based position shown to the user
	pub fn number(self) -> u8 {
		match self {
			WizardStep::Address => 1,
			WizardStep::Energy => 2,
			WizardStep::System => 3,
			WizardStep::Quote => 4,
		}
	}

	pub fn from_number(number: u8) -> Option<Self> {
		match number {
			1 => Some(WizardStep::Address),
			2 => Some(WizardStep::Energy),
			3 => Some(WizardStep::System),
			4 => Some(WizardStep::Quote),
			_ => None,
		}
	}

}

/// Where the session's building data came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum BuildingDataSource {
	/// The configured solar API
	Live,
	/// The mocked demo record
	Mock,
	/// Nothing could be fetched; defaults are used
	Unavailable,
}

/// One user's pass through the wizard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuoteSession {
	pub session_id: String,
	pub step: WizardStep,
	pub data: QuoteData,
	pub building_source: Option<BuildingDataSource>,
	pub quote: Option<SolarQuote>,
	pub layout: Option<PanelLayout>,
	pub lead_id: Option<String>,
	/// Bumped on every stored update; a write carrying an older version is
	/// rejected
	#[serde(default)]
	pub version: u64,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
	pub expires_at: DateTime<Utc>,
}

impl QuoteSession {
	pub fn new(ttl_minutes: i64) -> Self {
		let now = Utc::now();
		Self {
			session_id: Uuid::new_v4().to_string(),
			step: WizardStep::Address,
			data: QuoteData::default(),
			building_source: None,
			quote: None,
			layout: None,
			lead_id: None,
			version: 0,
			created_at: now,
			updated_at: now,
			expires_at: now + Duration::minutes(ttl_minutes),
		}
	}

	pub fn is_expired(&self) -> bool {
		Utc::now() > self.expires_at
	}

	/// Record activity and push the expiry out
	pub fn touch(&mut self, ttl_minutes: i64) {
		let now = Utc::now();
		self.updated_at = now;
		self.expires_at = now + Duration::minutes(ttl_minutes);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_step_order_and_numbers() {
		assert!(WizardStep::Address < WizardStep::Energy);
		assert!(WizardStep::System < WizardStep::Quote);
		for n in 1..=4 {
			assert_eq!(WizardStep::from_number(n).unwrap().number(), n);
		}
		assert_eq!(WizardStep::from_number(0), None);
	}

	#[test]
	fn test_new_session_starts_at_address() {
		let session = QuoteSession::new(60);
		assert_eq!(session.step, WizardStep::Address);
		assert!(!session.is_expired());
		assert!(session.quote.is_none());
	}

	#[test]
	fn test_negative_ttl_is_expired() {
		let session = QuoteSession::new(-1);
		assert!(session.is_expired());
	}
}
