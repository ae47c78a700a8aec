//! Input limits and runtime defaults

/// Largest residential system the calculator will price, in kW
pub const MAX_SYSTEM_SIZE_KW: f64 = 100.0;

/// Largest monthly electricity bill accepted, in USD
pub const MAX_MONTHLY_BILL_USD: f64 = 100_000.0;

/// Largest monthly usage accepted, in kWh
pub const MAX_MONTHLY_USAGE_KWH: f64 = 500_000.0;

/// Longest address string forwarded to the geocoder
pub const MAX_ADDRESS_LENGTH: usize = 512;

/// Minimum allowed provider timeout in milliseconds
pub const MIN_PROVIDER_TIMEOUT_MS: u64 = 100;

/// Maximum allowed provider timeout in milliseconds
pub const MAX_PROVIDER_TIMEOUT_MS: u64 = 30_000;

/// Default provider timeout in milliseconds
pub const DEFAULT_PROVIDER_TIMEOUT_MS: u64 = 10_000;

/// Default session lifetime in minutes
pub const DEFAULT_SESSION_TTL_MINUTES: i64 = 60;

/// Longest session lifetime accepted from configuration (one week)
pub const MAX_SESSION_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Simulated latency of the mock building-data provider
pub const DEFAULT_MOCK_DELAY_MS: u64 = 1_000;

/// Default rate limit: requests per minute
pub const DEFAULT_RATE_LIMIT_REQUESTS_PER_MINUTE: u32 = 600;
