//! Request bodies and settings used across the integration tests

use solar_config::{ConfigurableValue, Settings};
use solar_quote::serde_json::{json, Value};

pub static INTEGRITY_SECRET: &str = "test-secret-for-e2e-tests-12345678901234567890";

/// Address known to [`solar_quote::mocks::MockGeocoder::denver`]
pub static KNOWN_ADDRESS: &str = "1600 Pennsylvania St, Denver";

#[allow(dead_code)]
pub struct ApiFixtures;

#[allow(dead_code)]
impl ApiFixtures {
	/// Settings with a plain integrity secret and no simulated latency
	pub fn settings() -> Settings {
		let mut settings = Settings::default();
		settings.security.integrity_secret = ConfigurableValue::from_plain(INTEGRITY_SECRET);
		settings.providers.mock_delay_ms = 0;
		settings
	}

	pub fn quote_data() -> Value {
		json!({
			"address": "1600 Pennsylvania St, Denver, CO 80203, USA",
			"monthlyBill": 150.0,
			"roofType": "shingle",
			"panelType": "premium",
			"warranty": "basic",
			"battery": false
		})
	}

	pub fn energy() -> Value {
		json!({
			"monthlyBill": 150.0,
			"roofType": "shingle",
			"interest": "solar-panels"
		})
	}

	pub fn system() -> Value {
		json!({
			"panelType": "premium",
			"warranty": "extended",
			"battery": false
		})
	}

	pub fn contact() -> Value {
		json!({
			"name": "Ada Lovelace",
			"email": "ada@example.com",
			"phone": "555-0100"
		})
	}
}
