//! Startup and shutdown log banners

use crate::Settings;
use std::env;
use tracing::{info, warn};

/// Log service, platform and configuration summary at startup
pub fn log_service_info(settings: &Settings) {
	info!("=== Solar Quote Service Starting ===");
	info!("🚀 Service: solar-quote v{}", env!("CARGO_PKG_VERSION"));
	info!("💻 Platform: {} / {}", env::consts::OS, env::consts::ARCH);

	if let Ok(cwd) = env::current_dir() {
		info!("📁 Working Directory: {}", cwd.display());
	}
	if let Ok(config_path) = env::var("CONFIG_PATH") {
		info!("📋 Config Path: {}", config_path);
	}

	info!("🌍 Profile: {:?}", settings.environment.profile);
	info!(
		"🗺️ Geocoding: {} ({})",
		settings.providers.geocoding.provider_id, settings.providers.geocoding.endpoint
	);
	info!(
		"☀️ Solar data: {} ({})",
		settings.providers.solar.provider_id, settings.providers.solar.endpoint
	);
	for endpoint in [&settings.providers.geocoding, &settings.providers.solar] {
		match endpoint.resolve_api_key() {
			Ok(Some(key)) => info!("🔑 {} key: {}", endpoint.provider_id, key.masked()),
			Ok(None) => info!("🔑 {} key: none configured", endpoint.provider_id),
			Err(e) => warn!("⚠️ {} key unavailable: {}", endpoint.provider_id, e),
		}
	}
	if settings.providers.fallback_to_mock {
		info!(
			"🧪 Mock building data fallback enabled ({}ms delay)",
			settings.providers.mock_delay_ms
		);
	}
	info!(
		"💲 Pricing: ${:.2}/W, incentives {:.0}% federal + {:.0}% state",
		settings.pricing.price_per_watt,
		settings.pricing.federal_incentive_rate * 100.0,
		settings.pricing.state_incentive_rate * 100.0
	);

	if settings.security.integrity_secret.is_insecure_default() {
		warn!(
			"⚠️ Integrity secret is an insecure default ({})",
			settings.security.integrity_secret.description()
		);
	}

	info!(
		"🕒 Started at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_service_shutdown() {
	info!("🛑 Solar Quote Service Shutting Down");
	info!(
		"🕒 Shutdown at: {}",
		chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
	);
}

pub fn log_startup_complete(bind_address: &str) {
	info!("✅ Solar Quote Service Started Successfully");
	info!("🌐 Server listening on: {}", bind_address);
}
