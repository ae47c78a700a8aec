//! Quote calculator
//!
//! Pure arithmetic from [`QuoteData`] to [`SolarSystem`]. Nothing here does
//! I/O; the same inputs always produce the same system.

use solar_types::constants::limits::MAX_SYSTEM_SIZE_KW;
use solar_types::{PricingConfig, QuoteData, QuoteError, QuoteResult, SolarSystem};

fn round_to(value: f64, places: i32) -> f64 {
	let factor = 10f64.powi(places);
	(value * factor).round() / factor
}

fn cents(value: f64) -> f64 {
	round_to(value, 2)
}

/// Yearly usage in kWh: stated usage wins over a usage derived from the bill
pub fn annual_usage_kwh(data: &QuoteData, config: &PricingConfig) -> Option<f64> {
	data.monthly_usage_kwh
		.or_else(|| data.monthly_bill.map(|bill| bill / config.electricity_rate))
		.map(|monthly| monthly * 12.0)
}

/// kWh per installed kW per year at this site
pub fn production_factor(data: &QuoteData, config: &PricingConfig) -> f64 {
	data.building
		.as_ref()
		.and_then(|building| building.production_factor())
		.unwrap_or(config.default_production_kwh_per_kw)
}

/// System size that covers `annual_usage`, in 0.1 kW steps, clamped to the
/// minimum system, the largest quotable system and what the roof can hold
pub fn recommended_size_kw(data: &QuoteData, annual_usage: f64, config: &PricingConfig) -> f64 {
	let mut size = round_to(annual_usage / production_factor(data, config), 1)
		.max(config.min_system_kw)
		.min(MAX_SYSTEM_SIZE_KW);
	if let Some(roof_max) = data
		.building
		.as_ref()
		.and_then(|building| building.max_capacity_kw())
	{
		size = size.min(round_to(roof_max, 1));
	}
	size
}

/// Savings over the analysis period, net of the system price
fn lifetime_savings(annual_production: f64, net_price: f64, config: &PricingConfig) -> f64 {
	let gross_savings: f64 = (0..config.analysis_years)
		.map(|year| {
			let year = year as i32;
			let production = annual_production * (1.0 - config.panel_degradation_rate).powi(year);
			let rate = config.electricity_rate * (1.0 + config.utility_inflation_rate).powi(year);
			production * rate
		})
		.sum();
	gross_savings - net_price
}

/// Compute the full system for validated inputs
pub fn calculate_system(data: &QuoteData, config: &PricingConfig) -> QuoteResult<SolarSystem> {
	data.validate()?;

	let annual_usage = annual_usage_kwh(data, config).ok_or_else(|| QuoteError::CalculationFailed {
		reason: "no usage or bill to size the system from".to_string(),
	})?;
	let factor = production_factor(data, config);
	let recommended = recommended_size_kw(data, annual_usage, config);
	let system_size_kw = data.system_size_kw.unwrap_or(recommended);

	let panel = data.panel_type.spec();
	let system_watts = (system_size_kw * 1000.0).round();
	let panel_count = (system_watts / f64::from(panel.watts)).ceil() as u32;

	let equipment_cost = cents(
		system_watts * config.price_per_watt * panel.price_multiplier * data.roof_type.price_multiplier(),
	);
	let warranty_cost = cents(equipment_cost * data.warranty.surcharge_rate());
	let battery_cost = if data.battery { config.battery_price } else { 0.0 };
	let gross_price = cents(equipment_cost + warranty_cost + battery_cost);

	let federal_incentive = cents(gross_price * config.federal_incentive_rate);
	let state_incentive = cents(gross_price * config.state_incentive_rate);
	let net_price = cents(gross_price - federal_incentive - state_incentive);

	let annual_production_kwh = (system_size_kw * factor).round();
	let annual_savings = cents(annual_production_kwh * config.electricity_rate);
	let monthly_savings = cents(annual_savings / 12.0);
	let payback_years = (annual_savings > 0.0).then(|| round_to(net_price / annual_savings, 1));

	let carbon_factor = data
		.building
		.as_ref()
		.map(|building| building.solar_potential.carbon_offset_factor_kg_per_mwh)
		.filter(|factor| *factor > 0.0)
		.unwrap_or(config.default_carbon_factor_kg_per_mwh);
	let carbon_offset_tons = round_to(annual_production_kwh / 1000.0 * carbon_factor / 1000.0, 2);

	let panel_area = data
		.building
		.as_ref()
		.and_then(|building| {
			let potential = &building.solar_potential;
			Some(potential.panel_height_meters? * potential.panel_width_meters?)
		})
		.unwrap_or_else(|| config.panel_area_m2());
	let array_area_m2 = round_to(f64::from(panel_count) * panel_area, 2);
	let roof_area_m2 = data
		.building
		.as_ref()
		.map(|building| building.total_ground_area_m2())
		.filter(|area| *area > 0.0)
		.map(|area| round_to(area, 2))
		.unwrap_or(array_area_m2);

	let system = SolarSystem {
		system_size_kw: round_to(system_size_kw, 2),
		recommended_size_kw: recommended,
		panel_count,
		panel_type: data.panel_type,
		panel_watts: panel.watts,
		panel_efficiency_pct: panel.efficiency_pct,
		equipment_cost,
		warranty_cost,
		battery_cost,
		gross_price,
		federal_incentive,
		state_incentive,
		net_price,
		annual_usage_kwh: annual_usage.round(),
		annual_production_kwh,
		offset_pct: round_to(annual_production_kwh / annual_usage * 100.0, 1),
		monthly_savings,
		annual_savings,
		lifetime_savings: cents(lifetime_savings(annual_production_kwh, net_price, config)),
		payback_years,
		carbon_offset_tons,
		roof_area_m2,
		array_area_m2,
	};

	if !system.net_price.is_finite() || !system.lifetime_savings.is_finite() {
		return Err(QuoteError::CalculationFailed {
			reason: "non-finite result".to_string(),
		});
	}
	Ok(system)
}
