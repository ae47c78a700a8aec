//! Pricing constants used by the quote calculator

use serde::{Deserialize, Serialize};

/// Tunable constants of the pricing formula.
///
/// Defaults are the published pricing; deployments may override any of
/// them through the `pricing` configuration section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
	/// Installed price per DC watt, USD
	pub price_per_watt: f64,
	/// Federal tax credit as a fraction of the gross price
	pub federal_incentive_rate: f64,
	/// State/utility rebate as a fraction of the gross price
	pub state_incentive_rate: f64,
	/// Retail electricity price, USD per kWh
	pub electricity_rate: f64,
	/// Yearly kWh per installed kW when no building data is available
	pub default_production_kwh_per_kw: f64,
	pub battery_price: f64,
	/// Yearly increase of the electricity price
	pub utility_inflation_rate: f64,
	/// Yearly loss of panel output
	pub panel_degradation_rate: f64,
	pub analysis_years: u32,
	pub min_system_kw: f64,
	/// Grid carbon intensity when the building data has none
	pub default_carbon_factor_kg_per_mwh: f64,
	pub panel_height_m: f64,
	pub panel_width_m: f64,
}

impl Default for PricingConfig {
	fn default() -> Self {
		Self {
			price_per_watt: 2.85,
			federal_incentive_rate: 0.30,
			state_incentive_rate: 0.10,
			electricity_rate: 0.16,
			default_production_kwh_per_kw: 1_400.0,
			battery_price: 12_000.0,
			utility_inflation_rate: 0.03,
			panel_degradation_rate: 0.005,
			analysis_years: 25,
			min_system_kw: 2.0,
			default_carbon_factor_kg_per_mwh: 417.0,
			panel_height_m: 1.65,
			panel_width_m: 0.99,
		}
	}
}

impl PricingConfig {
	/// Footprint of one panel in square metres
	pub fn panel_area_m2(&self) -> f64 {
		self.panel_height_m * self.panel_width_m
	}

	pub fn total_incentive_rate(&self) -> f64 {
		self.federal_incentive_rate + self.state_incentive_rate
	}

	/// Check the constants describe a usable formula
	pub fn validate(&self) -> Result<(), String> {
		let positive = [
			("price_per_watt", self.price_per_watt),
			("electricity_rate", self.electricity_rate),
			(
				"default_production_kwh_per_kw",
				self.default_production_kwh_per_kw,
			),
			("min_system_kw", self.min_system_kw),
			("panel_height_m", self.panel_height_m),
			("panel_width_m", self.panel_width_m),
		];
		for (name, value) in positive {
			if !value.is_finite() || value <= 0.0 {
				return Err(format!("pricing.{} must be positive", name));
			}
		}
		let fractions = [
			("federal_incentive_rate", self.federal_incentive_rate),
			("state_incentive_rate", self.state_incentive_rate),
			("utility_inflation_rate", self.utility_inflation_rate),
			("panel_degradation_rate", self.panel_degradation_rate),
		];
		for (name, value) in fractions {
			if !(0.0..1.0).contains(&value) {
				return Err(format!("pricing.{} must be in [0, 1)", name));
			}
		}
		if self.total_incentive_rate() >= 1.0 {
			return Err("pricing incentives must total less than 100%".to_string());
		}
		if self.battery_price < 0.0 || !self.battery_price.is_finite() {
			return Err("pricing.battery_price must not be negative".to_string());
		}
		if self.analysis_years == 0 {
			return Err("pricing.analysis_years must be at least 1".to_string());
		}
		Ok(())
	}
}

/// Rules for placing and dragging panels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Smallest allowed centre-to-centre distance between panels
	pub min_spacing_m: f64,
	/// Panels must stay within this distance of the building centre
	pub max_radius_m: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			min_spacing_m: 1.2,
			max_radius_m: 30.0,
		}
	}
}

impl LayoutConfig {
	pub fn validate(&self) -> Result<(), String> {
		if !self.min_spacing_m.is_finite() || self.min_spacing_m <= 0.0 {
			return Err("layout.min_spacing_m must be positive".to_string());
		}
		if !self.max_radius_m.is_finite() || self.max_radius_m <= self.min_spacing_m {
			return Err("layout.max_radius_m must exceed min_spacing_m".to_string());
		}
		Ok(())
	}
}
