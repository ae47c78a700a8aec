//! Identifiers of the built-in providers

/// Google Geocoding API client
pub const GOOGLE_GEOCODING_PROVIDER_ID: &str = "google-geocoding";

/// Google Solar API client
pub const GOOGLE_SOLAR_PROVIDER_ID: &str = "google-solar";

/// Fixed demo building record
pub const MOCK_SOLAR_PROVIDER_ID: &str = "mock-solar";
