//! Quote inputs (`QuoteData`) and the computed system (`SolarSystem`)

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "openapi")]
use utoipa::ToSchema;
use uuid::Uuid;

use crate::building::BuildingData;
use crate::constants::limits::{
	MAX_ADDRESS_LENGTH, MAX_MONTHLY_BILL_USD, MAX_MONTHLY_USAGE_KWH, MAX_SYSTEM_SIZE_KW,
};
use crate::integrity::IntegrityPayload;
use crate::models::LatLng;

pub mod errors;

pub use errors::{QuoteError, QuoteValidationError};

/// Result type for quote operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Result type for quote validation operations
pub type QuoteValidationResult<T> = Result<T, QuoteValidationError>;

/// Roof covering, which drives installation labour
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum RoofType {
	#[default]
	Shingle,
	Metal,
	Tile,
	Flat,
	Other,
}

impl RoofType {
	/// Installation price multiplier applied to the equipment cost
	pub fn price_multiplier(self) -> f64 {
		match self {
			RoofType::Shingle => 1.00,
			RoofType::Metal => 1.05,
			RoofType::Tile => 1.15,
			RoofType::Flat => 1.10,
			RoofType::Other => 1.08,
		}
	}
}

/// Fixed properties of a panel model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelSpec {
	pub watts: u32,
	pub efficiency_pct: f64,
	pub price_multiplier: f64,
}

/// Panel product line offered in the wizard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum PanelType {
	#[default]
	Standard,
	Premium,
	Elite,
}

impl PanelType {
	pub fn spec(self) -> PanelSpec {
		match self {
			PanelType::Standard => PanelSpec {
				watts: 370,
				efficiency_pct: 19.5,
				price_multiplier: 1.00,
			},
			PanelType::Premium => PanelSpec {
				watts: 400,
				efficiency_pct: 21.0,
				price_multiplier: 1.15,
			},
			PanelType::Elite => PanelSpec {
				watts: 430,
				efficiency_pct: 22.8,
				price_multiplier: 1.30,
			},
		}
	}
}

/// Workmanship warranty tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum WarrantyTier {
	#[default]
	Basic,
	Extended,
	Premium,
}

impl WarrantyTier {
	/// Surcharge as a fraction of the equipment cost
	pub fn surcharge_rate(self) -> f64 {
		match self {
			WarrantyTier::Basic => 0.0,
			WarrantyTier::Extended => 0.05,
			WarrantyTier::Premium => 0.10,
		}
	}
}

/// What the homeowner said they are interested in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Interest {
	#[default]
	SolarPanels,
	BatteryStorage,
	Both,
	Consultation,
}

/// Everything the user has entered so far, plus fetched location data.
///
/// Mutated step by step by the wizard; the calculator reads it as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct QuoteData {
	#[serde(default)]
	pub address: String,
	/// Average monthly electricity bill in USD
	#[serde(default)]
	pub monthly_bill: Option<f64>,
	/// Average monthly usage in kWh; takes precedence over the bill
	#[serde(default)]
	pub monthly_usage_kwh: Option<f64>,
	#[serde(default)]
	pub roof_type: RoofType,
	/// Chosen system size; `None` means use the recommended size
	#[serde(default)]
	pub system_size_kw: Option<f64>,
	#[serde(default)]
	pub panel_type: PanelType,
	#[serde(default)]
	pub warranty: WarrantyTier,
	#[serde(default)]
	pub battery: bool,
	#[serde(default)]
	pub interest: Interest,
	#[serde(default)]
	pub location: Option<LatLng>,
	#[serde(default)]
	pub building: Option<BuildingData>,
}

impl QuoteData {
	/// Validate the address as entered in step one
	pub fn validate_address(address: &str) -> QuoteValidationResult<()> {
		let trimmed = address.trim();
		if trimmed.is_empty() {
			return Err(QuoteValidationError::MissingRequiredField {
				field: "address".to_string(),
			});
		}
		if trimmed.len() > MAX_ADDRESS_LENGTH {
			return Err(QuoteValidationError::InvalidValue {
				field: "address".to_string(),
				reason: format!("longer than {} characters", MAX_ADDRESS_LENGTH),
			});
		}
		Ok(())
	}

	/// Validate the energy inputs: at least one of bill or usage, both sane
	pub fn validate_energy(&self) -> QuoteValidationResult<()> {
		if self.monthly_bill.is_none() && self.monthly_usage_kwh.is_none() {
			return Err(QuoteValidationError::MissingRequiredField {
				field: "monthlyBill".to_string(),
			});
		}
		if let Some(bill) = self.monthly_bill {
			check_positive("monthlyBill", bill, MAX_MONTHLY_BILL_USD)?;
		}
		if let Some(usage) = self.monthly_usage_kwh {
			check_positive("monthlyUsageKwh", usage, MAX_MONTHLY_USAGE_KWH)?;
		}
		Ok(())
	}

	/// Validate the system configuration chosen in step three
	pub fn validate_system(&self) -> QuoteValidationResult<()> {
		if let Some(size) = self.system_size_kw {
			if !size.is_finite() || size <= 0.0 || size > MAX_SYSTEM_SIZE_KW {
				return Err(QuoteValidationError::SystemSizeOutOfRange {
					value: size,
					max: MAX_SYSTEM_SIZE_KW,
				});
			}
		}
		Ok(())
	}

	/// Everything the calculator needs
	pub fn validate(&self) -> QuoteValidationResult<()> {
		self.validate_energy()?;
		self.validate_system()?;
		if let Some(location) = &self.location {
			if !location.is_valid() {
				return Err(QuoteValidationError::InvalidCoordinates {
					latitude: location.latitude,
					longitude: location.longitude,
				});
			}
		}
		Ok(())
	}
}

fn check_positive(field: &str, value: f64, max: f64) -> QuoteValidationResult<()> {
	if !value.is_finite() || value <= 0.0 {
		return Err(QuoteValidationError::InvalidValue {
			field: field.to_string(),
			reason: "must be a positive number".to_string(),
		});
	}
	if value > max {
		return Err(QuoteValidationError::InvalidValue {
			field: field.to_string(),
			reason: format!("must not exceed {}", max),
		});
	}
	Ok(())
}

/// The computed system: price, production and savings.
///
/// Never edited directly; recomputed from `QuoteData` whenever an input
/// changes. Currency fields are rounded to cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SolarSystem {
	pub system_size_kw: f64,
	pub recommended_size_kw: f64,
	pub panel_count: u32,
	pub panel_type: PanelType,
	pub panel_watts: u32,
	pub panel_efficiency_pct: f64,
	pub equipment_cost: f64,
	pub warranty_cost: f64,
	pub battery_cost: f64,
	pub gross_price: f64,
	pub federal_incentive: f64,
	pub state_incentive: f64,
	pub net_price: f64,
	pub annual_usage_kwh: f64,
	pub annual_production_kwh: f64,
	/// Share of annual usage covered by production, in percent
	pub offset_pct: f64,
	pub monthly_savings: f64,
	pub annual_savings: f64,
	pub lifetime_savings: f64,
	/// `None` when the system produces no savings
	pub payback_years: Option<f64>,
	pub carbon_offset_tons: f64,
	pub roof_area_m2: f64,
	pub array_area_m2: f64,
}

/// Canonical JSON of every field, in declaration order. Floats are written
/// in shortest round-trip form, so any change to any value alters the payload.
impl IntegrityPayload for SolarSystem {
	fn to_integrity_payload(&self) -> String {
		// A struct of numbers and unit enums always serialises
		serde_json::to_string(self).unwrap_or_default()
	}
}

/// A computed system wrapped with an id and an integrity checksum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SolarQuote {
	pub quote_id: String,
	pub system: SolarSystem,
	pub created_at: DateTime<Utc>,
	/// HMAC-SHA256 over the integrity payload
	#[serde(default)]
	pub integrity_checksum: Option<String>,
}

impl SolarQuote {
	pub fn new(system: SolarSystem) -> Self {
		Self {
			quote_id: Uuid::new_v4().to_string(),
			system,
			created_at: Utc::now(),
			integrity_checksum: None,
		}
	}
}

impl IntegrityPayload for SolarQuote {
	fn to_integrity_payload(&self) -> String {
		format!(
			"quote_id={}|created_at={}|{}",
			self.quote_id,
			self.created_at.timestamp(),
			self.system.to_integrity_payload()
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn energy_data() -> QuoteData {
		QuoteData {
			monthly_bill: Some(150.0),
			..Default::default()
		}
	}

	#[test]
	fn test_enum_wire_names() {
		assert_eq!(serde_json::to_string(&RoofType::Shingle).unwrap(), "\"shingle\"");
		assert_eq!(
			serde_json::to_string(&Interest::SolarPanels).unwrap(),
			"\"solar-panels\""
		);
		let interest: Interest = serde_json::from_str("\"battery-storage\"").unwrap();
		assert_eq!(interest, Interest::BatteryStorage);
	}

	#[test]
	fn test_quote_data_defaults_from_sparse_json() {
		let data: QuoteData = serde_json::from_str(r#"{"monthlyBill": 120}"#).unwrap();
		assert_eq!(data.monthly_bill, Some(120.0));
		assert_eq!(data.roof_type, RoofType::Shingle);
		assert_eq!(data.panel_type, PanelType::Standard);
		assert!(!data.battery);
		assert!(data.building.is_none());
	}

	#[test]
	fn test_energy_requires_bill_or_usage() {
		let err = QuoteData::default().validate_energy().unwrap_err();
		assert!(matches!(
			err,
			QuoteValidationError::MissingRequiredField { ref field } if field == "monthlyBill"
		));
		assert!(energy_data().validate_energy().is_ok());

		let usage_only = QuoteData {
			monthly_usage_kwh: Some(900.0),
			..Default::default()
		};
		assert!(usage_only.validate_energy().is_ok());
	}

	#[test]
	fn test_energy_rejects_non_positive_values() {
		let mut data = energy_data();
		data.monthly_bill = Some(-5.0);
		assert!(data.validate_energy().is_err());
		data.monthly_bill = Some(f64::INFINITY);
		assert!(data.validate_energy().is_err());
	}

	#[test]
	fn test_system_size_range() {
		let mut data = energy_data();
		data.system_size_kw = Some(0.0);
		assert!(data.validate_system().is_err());
		data.system_size_kw = Some(MAX_SYSTEM_SIZE_KW + 0.1);
		assert!(data.validate_system().is_err());
		data.system_size_kw = Some(5.2);
		assert!(data.validate().is_ok());
	}

	#[test]
	fn test_address_validation() {
		assert!(QuoteData::validate_address("   ").is_err());
		assert!(QuoteData::validate_address(&"x".repeat(MAX_ADDRESS_LENGTH + 1)).is_err());
		assert!(QuoteData::validate_address("1600 Amphitheatre Pkwy").is_ok());
	}

	#[test]
	fn test_panel_specs_increase_with_tier() {
		let standard = PanelType::Standard.spec();
		let elite = PanelType::Elite.spec();
		assert!(elite.watts > standard.watts);
		assert!(elite.efficiency_pct > standard.efficiency_pct);
		assert_eq!(PanelType::Premium.spec().watts, 400);
	}
}
